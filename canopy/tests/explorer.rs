use std::time::Duration;

use canopy::config::{DisabledType, LoadingBehavior, MenuAction, Selectability, TreeConfig};
use canopy::error::{SelectionError, StructuralWarning};
use canopy::explorer::{TreeEvent, TreeExplorer};
use canopy::node::TreeNode;
use canopy::state::SelectionState;
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn named(id: &str, name: &str) -> TreeNode {
    TreeNode::new(id).set("name", name)
}

// A{B, C{D, E}}
fn sample() -> Vec<TreeNode> {
    vec![
        named("A", "Alpha")
            .child(named("B", "Beta"))
            .child(named("C", "Gamma").child(named("D", "Delta")).child(named("E", "Epsilon"))),
    ]
}

fn files() -> Vec<TreeNode> {
    vec![
        named("docs", "Documents")
            .set("type", "folder")
            .child(named("report", "Report.pdf").set("type", "document"))
            .child(named("backup", "Backup.zip").set("type", "archive"))
            .child(named("photo", "Holiday.png").set("type", "image")),
        named("empty", "Empty").set("type", "folder"),
    ]
}

fn no_loading() -> TreeConfig {
    TreeConfig::default().with_loading_behavior(LoadingBehavior::disabled())
}

fn explorer(roots: Vec<TreeNode>) -> TreeExplorer {
    TreeExplorer::new(roots, no_loading())
}

// -------------------------------------------------------------------------
// Projection
// -------------------------------------------------------------------------

#[test]
fn test_projection_follows_expansion() {
    let explorer = explorer(sample());
    assert_eq!(explorer.visible_ids(), vec!["A"]);

    explorer.toggle_expansion("A");
    assert_eq!(explorer.visible_ids(), vec!["A", "B", "C"]);

    explorer.toggle_expansion("C");
    let rows = explorer.projection();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);
    assert_eq!(rows[3].depth, 2);
    assert_eq!(rows[3].label, "Delta");
    assert_eq!(rows[3].indent(), "    ");
    assert!(rows[2].is_expanded);
    assert!(rows[2].has_children);
    assert!(rows[2].node.is_leaf());
}

#[test]
fn test_collapsed_ancestor_hides_expanded_descendants() {
    let explorer = explorer(sample());
    explorer.expand_node("C");
    assert_eq!(explorer.visible_ids(), vec!["A"]);

    explorer.expand_node("A");
    assert_eq!(explorer.visible_ids(), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_collapse_all_then_expand_all() {
    let explorer = explorer(sample());
    explorer.expand_all();
    assert_eq!(explorer.visible_ids().len(), 5);

    explorer.collapse_all();
    assert_eq!(explorer.visible_ids(), vec!["A"]);

    explorer.expand_all();
    assert_eq!(explorer.visible_ids(), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_projection_resolves_icons_and_selectability() {
    let config = no_loading().with_disabled_type(DisabledType::new("archive", "Archives are read-only"));
    let explorer = TreeExplorer::new(files(), config);
    explorer.expand_node("docs");

    let rows = explorer.projection();
    let backup = rows.iter().find(|r| r.id == "backup").unwrap();
    assert_eq!(backup.icon, "archive");
    assert_eq!(backup.category, "archive");
    assert_eq!(
        backup.selectability,
        Selectability::Disabled {
            reason: "Archives are read-only".to_string()
        }
    );

    let report = rows.iter().find(|r| r.id == "report").unwrap();
    assert_eq!(report.icon, "article");
    assert!(report.selectability.is_selectable());
}

// -------------------------------------------------------------------------
// Search
// -------------------------------------------------------------------------

#[test]
fn test_search_keeps_matches_and_ancestors() {
    let explorer = explorer(files());
    explorer.expand_all();
    explorer.set_search_term("REPORT");

    assert_eq!(explorer.visible_ids(), vec!["docs", "report"]);
}

#[test]
fn test_search_does_not_expand() {
    let explorer = explorer(files());
    explorer.set_search_term("report");
    assert_eq!(explorer.visible_ids(), vec!["docs"]);

    explorer.toggle_expansion("docs");
    assert_eq!(explorer.visible_ids(), vec!["docs", "report"]);
}

#[test]
fn test_search_every_visible_row_matches_or_leads_to_match() {
    let explorer = explorer(sample());
    explorer.expand_all();
    explorer.set_search_term("ta");

    // Beta, Delta match; Alpha and Gamma are ancestors; Epsilon is dropped.
    assert_eq!(explorer.visible_ids(), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_search_uses_configured_label_property() {
    let roots = vec![
        TreeNode::new("a")
            .set("title", "Quarterly")
            .set("name", "ignored")
            .child(TreeNode::new("b").set("title", "Notes").set("name", "Quarterly draft")),
    ];
    let config = no_loading().with_label_property("title");
    let explorer = TreeExplorer::new(roots, config);
    explorer.expand_all();

    explorer.set_search_term("quarter");
    assert_eq!(explorer.visible_ids(), vec!["a"]);

    explorer.set_search_term("notes");
    assert_eq!(explorer.visible_ids(), vec!["a", "b"]);
}

#[test]
fn test_blank_search_disables_filter() {
    let explorer = explorer(sample());
    explorer.expand_all();
    explorer.set_search_term("zzz");
    assert!(explorer.visible_ids().is_empty());

    explorer.set_search_term("   ");
    assert_eq!(explorer.visible_ids().len(), 5);
    assert_eq!(explorer.search_term(), "   ");
}

// -------------------------------------------------------------------------
// Selection
// -------------------------------------------------------------------------

#[test]
fn test_toggle_selection_cascades_and_propagates() {
    init_logger();
    let explorer = explorer(sample());

    let change = explorer.toggle_selection("D").unwrap();
    assert_eq!(change.selected_ids, vec!["D"]);
    assert_eq!(explorer.selection_state("C"), SelectionState::Partial);
    assert_eq!(explorer.selection_state("A"), SelectionState::Partial);

    let change = explorer.toggle_selection("E").unwrap();
    assert_eq!(change.selected_ids, vec!["C", "D", "E"]);
    assert_eq!(change.selected_nodes.len(), 3);
    assert_eq!(explorer.selection_state("C"), SelectionState::Selected);
    assert_eq!(explorer.selection_state("A"), SelectionState::Partial);

    let change = explorer.toggle_selection("A").unwrap();
    assert_eq!(change.selected_ids, vec!["A", "B", "C", "D", "E"]);

    let change = explorer.toggle_selection("A").unwrap();
    assert!(change.selected_ids.is_empty());
    assert_eq!(explorer.selection_state("A"), SelectionState::Unselected);
}

#[test]
fn test_toggle_selection_emits_event() {
    let explorer = explorer(sample());
    let change = explorer.toggle_selection("B").unwrap();

    let events = explorer.drain_events();
    assert_eq!(events, vec![TreeEvent::SelectionChanged(change)]);
    assert!(explorer.drain_events().is_empty());
}

#[test]
fn test_toggle_selection_unknown_id() {
    let explorer = explorer(sample());
    let err = explorer.toggle_selection("ghost").unwrap_err();

    assert_eq!(err, SelectionError::not_found("ghost"));
    assert!(explorer.drain_events().is_empty());
}

#[test]
fn test_disabled_node_cannot_be_selected() {
    let config = no_loading().with_disabled_type(DisabledType::new("archive", "Archives are read-only"));
    let explorer = TreeExplorer::new(files(), config);

    let err = explorer.toggle_selection("backup").unwrap_err();
    assert_eq!(err.id(), "backup");
    assert_eq!(err.reason(), Some("Archives are read-only"));
    assert!(!explorer.is_selected("backup"));
    assert!(explorer.drain_events().is_empty());
    assert!(!explorer.is_selectable("backup"));
}

#[test]
fn test_parent_cascade_includes_disabled_descendants() {
    let config = no_loading().with_disabled_type(DisabledType::new("archive", "Archives are read-only"));
    let explorer = TreeExplorer::new(files(), config);

    explorer.toggle_selection("docs").unwrap();
    assert!(explorer.is_selected("backup"));

    // Deselecting a disabled node is always allowed.
    explorer.toggle_selection("backup").unwrap();
    assert!(!explorer.is_selected("backup"));
    assert_eq!(explorer.selection_state("docs"), SelectionState::Partial);
}

#[test]
fn test_allow_list_rejects_other_categories() {
    let config = no_loading().with_selectable_types(["document"]);
    let explorer = TreeExplorer::new(files(), config);

    assert!(explorer.toggle_selection("report").is_ok());
    let err = explorer.toggle_selection("photo").unwrap_err();
    assert!(matches!(err, SelectionError::Rejected { .. }));
    assert_eq!(err.reason(), Some("image items cannot be selected"));
}

#[test]
fn test_preselected_leaf_propagates() {
    let config = no_loading().with_preselected_nodes(["D"]);
    let explorer = TreeExplorer::new(sample(), config);

    assert_eq!(explorer.selected_ids(), vec!["D"]);
    assert_eq!(explorer.selection_state("C"), SelectionState::Partial);
    assert_eq!(explorer.selection_state("A"), SelectionState::Partial);
}

#[test]
fn test_preselected_interior_does_not_cascade() {
    let config = no_loading().with_preselected_nodes(["C"]);
    let explorer = TreeExplorer::new(sample(), config);

    assert!(explorer.selected_ids().is_empty());
    assert_eq!(explorer.selection_state("C"), SelectionState::Unselected);
    assert_eq!(explorer.selection_state("A"), SelectionState::Unselected);

    let config = no_loading().with_preselected_nodes(["C", "D", "E"]);
    let explorer = TreeExplorer::new(sample(), config);
    assert_eq!(explorer.selected_ids(), vec!["C", "D", "E"]);
    assert_eq!(explorer.selection_state("C"), SelectionState::Selected);
}

#[test]
fn test_select_nodes_without_cascade() {
    let explorer = explorer(sample());
    explorer.select_nodes(["D", "E"]);
    assert_eq!(explorer.selected_ids(), vec!["C", "D", "E"]);

    explorer.deselect_nodes(["E"]);
    assert_eq!(explorer.selected_ids(), vec!["D"]);
    assert_eq!(explorer.selected_nodes().len(), 1);
}

#[test]
fn test_clear_selection_emits_empty_change() {
    let explorer = explorer(sample());
    explorer.toggle_selection("A").unwrap();
    explorer.drain_events();

    explorer.clear_selection();
    assert!(explorer.selected_ids().is_empty());
    assert!(matches!(
        explorer.drain_events().as_slice(),
        [TreeEvent::SelectionChanged(change)] if change.selected_ids.is_empty()
    ));
}

// -------------------------------------------------------------------------
// Expansion events
// -------------------------------------------------------------------------

#[test]
fn test_toggle_expansion_events() {
    let explorer = explorer(files());

    assert!(explorer.toggle_expansion("docs"));
    assert!(!explorer.toggle_expansion("docs"));
    assert!(explorer.toggle_expansion("empty"));

    let events = explorer.drain_events();
    assert!(matches!(&events[0], TreeEvent::Expanded { id, .. } if id == "docs"));
    assert!(matches!(&events[1], TreeEvent::Collapsed { id, .. } if id == "docs"));
    assert!(matches!(&events[2], TreeEvent::Expanded { id, .. } if id == "empty"));
    assert!(matches!(&events[3], TreeEvent::ChildrenRequested { id } if id == "empty"));
    assert_eq!(events.len(), 4);
}

#[test]
fn test_toggle_expansion_unknown_id_is_noop() {
    let explorer = explorer(sample());
    assert!(!explorer.toggle_expansion("ghost"));
    assert!(explorer.expanded_ids().is_empty());
    assert!(explorer.drain_events().is_empty());
}

#[test]
fn test_set_root_data_keeps_state() {
    let explorer = explorer(files());
    explorer.toggle_expansion("empty");
    explorer.toggle_selection("empty").unwrap();

    let mut roots = files();
    roots[1] = roots[1].clone().child(named("new", "New.txt"));
    explorer.set_root_data(roots);

    assert!(explorer.is_expanded("empty"));
    assert!(explorer.visible_ids().contains(&"new".to_string()));
    // "empty" is no longer a leaf and its only child is unselected.
    assert_eq!(explorer.selection_state("empty"), SelectionState::Unselected);
}

// -------------------------------------------------------------------------
// Pass-through events
// -------------------------------------------------------------------------

#[test]
fn test_click_forwards_and_toggles() {
    let explorer = explorer(files());

    assert!(explorer.click_node("docs"));
    assert!(explorer.is_expanded("docs"));
    assert!(explorer.click_node("report"));
    assert!(!explorer.click_node("ghost"));
    assert!(explorer.double_click_node("report"));

    let events = explorer.drain_events();
    assert!(matches!(&events[0], TreeEvent::NodeClicked { node } if node.id == "docs"));
    assert!(matches!(&events[1], TreeEvent::Expanded { id, .. } if id == "docs"));
    assert!(matches!(&events[2], TreeEvent::NodeClicked { node } if node.id == "report"));
    assert!(matches!(&events[3], TreeEvent::NodeDoubleClicked { node } if node.id == "report"));
}

#[test]
fn test_menu_action_resolves_node() {
    let explorer = explorer(files());
    let action = MenuAction::new("report", "delete").with_data("confirm");

    assert!(explorer.menu_action(action.clone()));
    assert!(!explorer.menu_action(MenuAction::new("ghost", "delete")));

    let events = explorer.drain_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        TreeEvent::MenuAction { action: forwarded, node } => {
            assert_eq!(forwarded, &action);
            assert_eq!(node.id, "report");
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_context_menu_hidden() {
    let explorer = explorer(files());
    assert_eq!(explorer.context_menu_items().len(), 3);

    let hidden = TreeExplorer::new(files(), no_loading().with_show_context_menu(false));
    assert!(hidden.context_menu_items().is_empty());
}

// -------------------------------------------------------------------------
// Validation, snapshots, dirty tracking
// -------------------------------------------------------------------------

#[test]
fn test_structural_warnings_are_not_fatal() {
    init_logger();
    let roots = vec![
        TreeNode::new("a").child(TreeNode::new("a")),
        TreeNode::new("b"),
        TreeNode::new("b"),
    ];
    let explorer = TreeExplorer::new(roots, no_loading());

    let warnings = explorer.warnings();
    assert!(warnings.contains(&StructuralWarning::Cycle { id: "a".to_string() }));
    assert!(warnings.contains(&StructuralWarning::DuplicateId { id: "b".to_string() }));
    assert_eq!(explorer.visible_ids(), vec!["a", "b", "b"]);
}

#[test]
fn test_snapshot_restore() {
    let explorer = explorer(sample());
    explorer.expand_node("A");
    explorer.toggle_selection("C").unwrap();
    let snapshot = explorer.snapshot();

    explorer.collapse_all();
    explorer.clear_selection();
    explorer.restore_snapshot(snapshot);

    assert!(explorer.is_expanded("A"));
    assert_eq!(explorer.selected_ids(), vec!["C", "D", "E"]);
    assert_eq!(explorer.selection_state("A"), SelectionState::Partial);
}

#[test]
fn test_clones_share_state() {
    let explorer = explorer(sample());
    let other = explorer.clone();

    other.toggle_expansion("A");
    assert!(explorer.is_expanded("A"));
}

#[test]
fn test_dirty_flag() {
    let explorer = explorer(sample());
    assert!(explorer.is_dirty());
    explorer.clear_dirty();
    assert!(!explorer.is_dirty());

    explorer.set_search_term("");
    assert!(!explorer.is_dirty());

    explorer.toggle_expansion("A");
    assert!(explorer.is_dirty());
}

// -------------------------------------------------------------------------
// Loading indicator
// -------------------------------------------------------------------------

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn test_loading_clears_after_duration() {
    init_logger();
    let explorer = TreeExplorer::new(sample(), TreeConfig::default());

    explorer.toggle_expansion("A");
    assert!(explorer.is_loading("A"));
    assert!(explorer.projection()[0].is_loading);
    assert_eq!(explorer.pending_loading_timers(), 1);

    advance(500).await;
    assert!(explorer.is_loading("A"));

    advance(501).await;
    assert!(!explorer.is_loading("A"));
    assert_eq!(explorer.pending_loading_timers(), 0);
    assert!(
        explorer
            .drain_events()
            .contains(&TreeEvent::LoadingFinished { id: "A".to_string() })
    );
}

#[tokio::test(start_paused = true)]
async fn test_leaf_expand_does_not_load() {
    let explorer = TreeExplorer::new(sample(), TreeConfig::default());
    explorer.toggle_expansion("B");
    assert!(!explorer.is_loading("B"));
    assert_eq!(explorer.pending_loading_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_collapse_cancels_loading() {
    let explorer = TreeExplorer::new(sample(), TreeConfig::default());

    explorer.toggle_expansion("A");
    explorer.toggle_expansion("A");
    assert!(!explorer.is_loading("A"));
    assert_eq!(explorer.pending_loading_timers(), 0);

    advance(1500).await;
    assert!(
        !explorer
            .drain_events()
            .iter()
            .any(|e| matches!(e, TreeEvent::LoadingFinished { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_does_not_clear_reexpanded_node() {
    let explorer = TreeExplorer::new(sample(), TreeConfig::default());

    explorer.toggle_expansion("A");
    advance(600).await;
    explorer.toggle_expansion("A");
    explorer.toggle_expansion("A");

    // The first timer would have fired at 1000ms.
    advance(500).await;
    assert!(explorer.is_loading("A"));

    advance(600).await;
    assert!(!explorer.is_loading("A"));
}

#[tokio::test(start_paused = true)]
async fn test_custom_loading_duration() {
    let config = TreeConfig::default()
        .with_loading_behavior(LoadingBehavior::new().with_duration(Duration::from_millis(100)));
    let explorer = TreeExplorer::new(sample(), config);

    explorer.toggle_expansion("A");
    advance(101).await;
    assert!(!explorer.is_loading("A"));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_timers() {
    let explorer = TreeExplorer::new(sample(), TreeConfig::default());
    explorer.expand_all();
    explorer.toggle_expansion("A");
    explorer.toggle_expansion("A");
    explorer.toggle_expansion("C");
    explorer.toggle_expansion("C");
    assert_eq!(explorer.loading_ids(), vec!["A", "C"]);

    explorer.shutdown();
    assert!(explorer.loading_ids().is_empty());
    assert_eq!(explorer.pending_loading_timers(), 0);
}

#[test]
fn test_loading_skipped_without_runtime() {
    init_logger();
    let explorer = TreeExplorer::new(sample(), TreeConfig::default());

    assert!(explorer.toggle_expansion("A"));
    assert!(explorer.is_expanded("A"));
    assert!(!explorer.is_loading("A"));
}

#[tokio::test(start_paused = true)]
async fn test_expand_node_shows_loading_for_duration() {
    let explorer = TreeExplorer::new(sample(), TreeConfig::default());

    explorer.expand_node("C");
    assert!(explorer.is_loading("C"));
    assert!(explorer.drain_events().is_empty());

    advance(1001).await;
    assert!(!explorer.is_loading("C"));
    assert!(explorer.is_expanded("C"));
}

#[test]
fn test_resolved_attributes_by_id() {
    let explorer = explorer(files());
    assert_eq!(explorer.label("report").as_deref(), Some("Report.pdf"));
    assert_eq!(explorer.icon("photo").as_deref(), Some("image"));
    assert_eq!(explorer.category("docs").as_deref(), Some("folder"));
    assert_eq!(explorer.label("ghost"), None);
    assert_eq!(explorer.selectability("ghost"), None);
}
