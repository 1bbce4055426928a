use serde_json::json;
use stalkline_core::{Category, CategoryKey, Dataset, EntryId, SelectionOrder, ViewConfig, ViewState};

fn two_category_config() -> ViewConfig {
    ViewConfig {
        categories: vec![
            Category::new("a", "Alpha", -6.0, "#ffcc00"),
            Category::new("b", "Beta", -2.0, "#00ffff"),
        ],
        ..ViewConfig::default()
    }
}

fn two_category_state() -> ViewState {
    let data = json!({
        "a": [{ "y": 10, "date": "d1", "event": "e1", "fact": "f1" }],
        "b": [{ "y": 20, "date": "d2", "event": "e2", "fact": "f2" }],
    });
    let dataset = Dataset::from_json_str(&data.to_string()).unwrap();
    ViewState::new(two_category_config(), dataset).unwrap()
}

fn wide_state(order: SelectionOrder) -> ViewState {
    let data = json!({
        "a": [
            { "y": 1, "date": "", "event": "", "fact": "" },
            { "y": 5, "date": "", "event": "", "fact": "" },
            { "y": 9, "date": "", "event": "", "fact": "" },
        ],
        "b": [
            { "y": 3, "date": "", "event": "", "fact": "" },
            { "y": 7, "date": "", "event": "", "fact": "" },
        ],
    });
    let dataset = Dataset::from_json_str(&data.to_string()).unwrap();
    let config = ViewConfig {
        selection_order: order,
        ..two_category_config()
    };
    ViewState::new(config, dataset).unwrap()
}

fn id(category: &str, y: f64) -> EntryId {
    EntryId::new(CategoryKey::new(category), y)
}

fn assert_selection_visible(state: &ViewState) {
    for selected in state.selection().iter() {
        assert!(state.is_visible(selected), "{selected} selected but hidden");
    }
}

#[test]
fn toggle_twice_restores_empty_selection() {
    let mut state = two_category_state();

    assert!(state.toggle_entry(&id("a", 10.0)));
    let selected: Vec<_> = state.selection().iter().cloned().collect();
    assert_eq!(selected, vec![id("a", 10.0)]);

    assert!(!state.toggle_entry(&id("a", 10.0)));
    assert!(state.selection().is_empty());
}

#[test]
fn range_filter_then_category_disable_empties_selection() {
    let mut state = two_category_state();
    state.set_range_lo(15.0);
    state.set_range_hi(25.0);

    let visible: Vec<EntryId> = state
        .visible_entries()
        .into_iter()
        .map(|(entry, _)| entry.id())
        .collect();
    assert_eq!(visible, vec![id("b", 20.0)]);

    assert!(state.toggle_entry(&id("b", 20.0)));
    assert_eq!(state.toggle_category(&CategoryKey::new("b")), Some(false));
    assert!(state.selection().is_empty());
}

#[test]
fn re_enabling_category_does_not_restore_selection() {
    let mut state = two_category_state();
    state.toggle_entry(&id("a", 10.0));
    state.toggle_category(&CategoryKey::new("a"));
    state.toggle_category(&CategoryKey::new("a"));

    assert!(state.is_category_enabled(&CategoryKey::new("a")));
    assert!(state.selection().is_empty());
}

#[test]
fn hidden_entry_cannot_be_selected() {
    let mut state = two_category_state();
    state.toggle_category(&CategoryKey::new("a"));

    assert!(!state.toggle_entry(&id("a", 10.0)));
    assert!(state.selection().is_empty());
}

#[test]
fn range_bounds_are_inclusive() {
    let mut state = wide_state(SelectionOrder::NewestFirst);
    state.set_range_lo(3.0);
    state.set_range_hi(7.0);

    let mut ys: Vec<f64> = state
        .visible_entries()
        .into_iter()
        .map(|(entry, _)| entry.y)
        .collect();
    ys.sort_by(f64::total_cmp);
    assert_eq!(ys, vec![3.0, 5.0, 7.0]);
}

#[test]
fn narrowing_range_evicts_only_out_of_range_selections() {
    let mut state = wide_state(SelectionOrder::NewestFirst);
    for (category, y) in [("a", 1.0), ("a", 5.0), ("b", 7.0), ("a", 9.0)] {
        assert!(state.toggle_entry(&id(category, y)));
    }

    state.set_range_lo(4.0);
    assert_selection_visible(&state);
    assert_eq!(state.selection().len(), 3);

    state.set_range_hi(8.0);
    assert_selection_visible(&state);
    assert_eq!(state.selection().len(), 2);

    state.reset_range();
    assert_eq!(state.range().lo(), 1.0);
    assert_eq!(state.range().hi(), 9.0);
    assert_eq!(state.selection().len(), 2);
}

#[test]
fn selection_stays_visible_through_mixed_operations() {
    let mut state = wide_state(SelectionOrder::Insertion);
    state.toggle_entry(&id("a", 5.0));
    state.toggle_entry(&id("b", 3.0));
    assert_selection_visible(&state);

    state.set_range_lo(4.0);
    assert_selection_visible(&state);

    state.toggle_category(&CategoryKey::new("b"));
    state.toggle_entry(&id("b", 7.0));
    assert_selection_visible(&state);

    state.set_range_hi(2.0);
    assert_selection_visible(&state);
    assert!(state.selection().is_empty());
}

#[test]
fn card_feed_orders_newest_first() {
    let mut state = wide_state(SelectionOrder::NewestFirst);
    for (category, y) in [("a", 1.0), ("b", 7.0), ("a", 5.0)] {
        state.toggle_entry(&id(category, y));
    }

    let ids: Vec<String> = state
        .card_feed()
        .into_iter()
        .map(|card| card.id.to_string())
        .collect();
    assert_eq!(ids, vec!["b@7", "a@5", "a@1"]);
}

#[test]
fn card_feed_keeps_insertion_order_when_configured() {
    let mut state = wide_state(SelectionOrder::Insertion);
    for (category, y) in [("a", 1.0), ("b", 7.0), ("a", 5.0)] {
        state.toggle_entry(&id(category, y));
    }

    let ids: Vec<String> = state
        .card_feed()
        .into_iter()
        .map(|card| card.id.to_string())
        .collect();
    assert_eq!(ids, vec!["a@1", "b@7", "a@5"]);
}

#[test]
fn card_feed_carries_category_and_text() {
    let mut state = two_category_state();
    state.toggle_entry(&id("b", 20.0));

    let feed = state.card_feed();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].display_name, "Beta");
    assert_eq!(feed[0].color, "#00ffff");
    assert_eq!(feed[0].date, "d2");
    assert_eq!(feed[0].event, "e2");
    assert_eq!(feed[0].fact, "f2");
}

#[test]
fn descriptors_follow_selection_and_label_toggle() {
    let mut state = two_category_state();
    state.toggle_entry(&id("a", 10.0));

    let descriptors = state.entry_descriptors();
    let selected = descriptors.iter().find(|d| d.id == id("a", 10.0)).unwrap();
    let resting = descriptors.iter().find(|d| d.id == id("b", 20.0)).unwrap();
    assert!(selected.selected && selected.label_visible);
    assert_eq!(selected.scale_target, 1.6);
    assert_eq!(selected.position, [-6.0, 10.0, 0.0]);
    assert!(!resting.label_visible);
    assert_eq!(resting.scale_target, 1.0);

    state.toggle_labels();
    assert!(state.entry_descriptors().iter().all(|d| d.label_visible));
}

#[test]
fn disabled_category_drops_stalk_and_title() {
    let mut state = two_category_state();
    state.toggle_category(&CategoryKey::new("a"));

    let stalks: Vec<String> = state
        .stalk_descriptors()
        .into_iter()
        .map(|s| s.key.to_string())
        .collect();
    assert_eq!(stalks, vec!["b"]);
    assert_eq!(state.title_strip().len(), 1);

    state.toggle_title();
    assert!(state.title_strip().is_empty());
}

#[test]
fn unknown_category_toggle_is_ignored() {
    let mut state = two_category_state();
    assert_eq!(state.toggle_category(&CategoryKey::new("zzz")), None);
    assert_eq!(state.stalk_descriptors().len(), 2);
}
