//! Tree explorer state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};
use std::time::Duration;

use crate::config::{ContextMenuItem, MenuAction, Selectability, TreeConfig};
use crate::error::{SelectionError, StructuralWarning};
use crate::node::TreeNode;
use crate::state::{SelectionState, TreeState, TreeStateStore};
use crate::utils;

use super::events::{SelectionChange, TreeEvent};
use super::loading::LoadingTimers;
use super::projection::ProjectedNode;

/// Internal state for the explorer.
#[derive(Debug)]
pub(super) struct ExplorerInner {
    /// Root nodes of the bound hierarchy.
    pub roots: Vec<TreeNode>,
    /// How node attributes are interpreted.
    pub config: TreeConfig,
    /// Expansion, selection and loading state.
    pub store: TreeStateStore,
    /// Active search term (untrimmed, as set).
    pub search_term: String,
    /// Warnings from the last structural validation.
    pub warnings: Vec<StructuralWarning>,
    /// Queued notifications.
    pub events: Vec<TreeEvent>,
    /// Outstanding loading timers.
    pub timers: LoadingTimers,
}

/// Binds a hierarchy and configuration to a [`TreeStateStore`].
///
/// `TreeExplorer` is the public surface consumed by a presentation layer:
/// - [`projection`](Self::projection) returns the display rows
/// - user intents ([`toggle_expansion`](Self::toggle_expansion),
///   [`toggle_selection`](Self::toggle_selection),
///   [`set_search_term`](Self::set_search_term), menu actions) mutate state
/// - [`drain_events`](Self::drain_events) yields the resulting notifications
///
/// Clones share the same state. Loading indicators are cleared by `tokio`
/// timers, so expanding with a loading behavior needs a running runtime;
/// without one the indicator is skipped.
///
/// # Example
///
/// ```
/// use canopy::config::{LoadingBehavior, TreeConfig};
/// use canopy::explorer::TreeExplorer;
/// use canopy::node::TreeNode;
///
/// let roots = vec![
///     TreeNode::new("docs")
///         .set("name", "Documents")
///         .child(TreeNode::new("report").set("name", "Report.pdf")),
/// ];
/// let config = TreeConfig::default().with_loading_behavior(LoadingBehavior::disabled());
/// let explorer = TreeExplorer::new(roots, config);
///
/// explorer.toggle_expansion("docs");
/// let labels: Vec<String> = explorer.projection().into_iter().map(|row| row.label).collect();
/// assert_eq!(labels, vec!["Documents", "Report.pdf"]);
/// ```
#[derive(Debug)]
pub struct TreeExplorer {
    /// Internal state.
    pub(super) inner: Arc<RwLock<ExplorerInner>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl TreeExplorer {
    /// Binds `roots` and `config` to a fresh store.
    ///
    /// Validates the hierarchy (warnings are logged and kept, never fatal)
    /// and applies `config.preselected_nodes`.
    pub fn new(roots: Vec<TreeNode>, config: TreeConfig) -> Self {
        let store = TreeStateStore::new();
        let preselected = config.preselected_nodes.clone();
        let explorer = Self::with_store(roots, config, store);
        if let Ok(mut guard) = explorer.inner.write() {
            let inner = &mut *guard;
            apply_preselection(&mut inner.store, &inner.roots, &preselected);
        }
        explorer
    }

    /// Binds `roots` and `config` to an existing store, e.g. one restored
    /// from another explorer's snapshot. Preselection is not applied.
    pub fn with_store(roots: Vec<TreeNode>, config: TreeConfig, mut store: TreeStateStore) -> Self {
        if config.has_conflicting_selectability() {
            log::warn!("[explorer] both selectable_types and disabled_types set; disabled_types is ignored");
        }
        let warnings = validate(&roots);
        store.recompute_selection_states(&roots);

        Self {
            inner: Arc::new(RwLock::new(ExplorerInner {
                roots,
                config,
                store,
                search_term: String::new(),
                warnings,
                events: Vec::new(),
                timers: LoadingTimers::default(),
            })),
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    // -------------------------------------------------------------------------
    // Hierarchy and configuration
    // -------------------------------------------------------------------------

    /// Get the root nodes.
    pub fn roots(&self) -> Vec<TreeNode> {
        self.inner
            .read()
            .map(|g| g.roots.clone())
            .unwrap_or_default()
    }

    /// Get a copy of the configuration.
    pub fn config(&self) -> TreeConfig {
        self.inner
            .read()
            .map(|g| g.config.clone())
            .unwrap_or_default()
    }

    /// Replace the hierarchy, e.g. after the data provider loaded children.
    ///
    /// Expansion, selection and loading state are kept; tri-states are
    /// recomputed against the new hierarchy.
    pub fn set_root_data(&self, roots: Vec<TreeNode>) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            inner.warnings = validate(&roots);
            inner.roots = roots;
            inner.store.recompute_selection_states(&inner.roots);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the warnings from the last structural validation.
    pub fn warnings(&self) -> Vec<StructuralWarning> {
        self.inner
            .read()
            .map(|g| g.warnings.clone())
            .unwrap_or_default()
    }

    /// Find a node by id in the entire hierarchy (including collapsed).
    pub fn find(&self, id: &str) -> Option<TreeNode> {
        self.inner
            .read()
            .ok()
            .and_then(|g| utils::find_by_id(id, &g.roots).cloned())
    }

    /// Resolve a node's label, or `None` if the id is unknown.
    pub fn label(&self, id: &str) -> Option<String> {
        self.resolve(id, |config, node| config.label(node).to_string())
    }

    /// Resolve a node's icon name, or `None` if the id is unknown.
    pub fn icon(&self, id: &str) -> Option<String> {
        self.resolve(id, TreeConfig::icon)
    }

    /// Resolve a node's category tag, or `None` if the id is unknown.
    pub fn category(&self, id: &str) -> Option<String> {
        self.resolve(id, TreeConfig::category)
    }

    fn resolve<T>(&self, id: &str, f: impl Fn(&TreeConfig, &TreeNode) -> T) -> Option<T> {
        let guard = self.inner.read().ok()?;
        utils::find_by_id(id, &guard.roots).map(|node| f(&guard.config, node))
    }

    // -------------------------------------------------------------------------
    // Projection and search
    // -------------------------------------------------------------------------

    /// Compute the display rows.
    ///
    /// With an active search term the hierarchy is first pruned to nodes
    /// whose label contains the term (ignoring case) and their ancestors,
    /// then flattened with the current expansion state.
    pub fn projection(&self) -> Vec<ProjectedNode> {
        self.inner
            .read()
            .map(|g| Self::project(&g))
            .unwrap_or_default()
    }

    fn project(inner: &ExplorerInner) -> Vec<ProjectedNode> {
        let term = inner.search_term.trim();
        let filtered;
        let nodes: &[TreeNode] = if term.is_empty() {
            &inner.roots
        } else {
            let needle = term.to_lowercase();
            filtered = utils::filter_tree(&inner.roots, |node| {
                inner
                    .config
                    .search_label(node)
                    .is_some_and(|label| label.to_lowercase().contains(&needle))
            });
            &filtered
        };

        let rows: Vec<ProjectedNode> = utils::flatten(nodes, inner.store.expanded())
            .iter()
            .map(|flat| ProjectedNode::new(flat, &inner.config, &inner.store))
            .collect();
        log::trace!("[explorer] projected {} rows (search: {:?})", rows.len(), term);
        rows
    }

    /// Get the ids of the projected rows in order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.projection().into_iter().map(|row| row.id).collect()
    }

    /// Get the active search term.
    pub fn search_term(&self) -> String {
        self.inner
            .read()
            .map(|g| g.search_term.clone())
            .unwrap_or_default()
    }

    /// Set the search term. An empty or blank term disables filtering.
    pub fn set_search_term(&self, term: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            let term = term.into();
            if guard.search_term != term {
                guard.search_term = term;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Toggle a node's expansion on user intent.
    ///
    /// Expanding a node with children shows its loading indicator when the
    /// configured loading behavior is enabled. Expanding a node without
    /// children requests them from the data provider. Collapsing cancels a
    /// pending indicator. Returns the new expanded flag, or `false` if the
    /// id is unknown.
    pub fn toggle_expansion(&self, id: &str) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let inner = &mut *guard;
        let Some(node) = utils::find_by_id(id, &inner.roots) else {
            log::debug!("[explorer] toggle_expansion: unknown node {}", id);
            return false;
        };
        let node = node.clone();

        let expanded = inner.store.toggle_expansion(id);
        if expanded {
            let has_children = node.has_children();
            inner.events.push(TreeEvent::Expanded {
                id: id.to_string(),
                node,
            });
            if !has_children {
                inner.events.push(TreeEvent::ChildrenRequested { id: id.to_string() });
            } else if inner.config.loading_behavior.show_on_expand {
                let duration = inner.config.loading_behavior.duration();
                self.start_loading(inner, id, duration);
            }
        } else {
            Self::stop_loading(inner, id);
            inner.events.push(TreeEvent::Collapsed {
                id: id.to_string(),
                node,
            });
        }

        self.dirty.store(true, Ordering::SeqCst);
        expanded
    }

    /// Expand a node without queuing events.
    ///
    /// The loading indicator is shown as for
    /// [`toggle_expansion`](Self::toggle_expansion).
    pub fn expand_node(&self, id: &str) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let inner = &mut *guard;
        if inner.store.is_expanded(id) {
            return;
        }
        inner.store.expand_node(id);

        let has_children = utils::find_by_id(id, &inner.roots).is_some_and(TreeNode::has_children);
        if has_children && inner.config.loading_behavior.show_on_expand {
            let duration = inner.config.loading_behavior.duration();
            self.start_loading(inner, id, duration);
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Collapse a node, cancelling its loading indicator.
    pub fn collapse_node(&self, id: &str) {
        if let Ok(mut guard) = self.inner.write()
            && guard.store.is_expanded(id)
        {
            guard.store.collapse_node(id);
            Self::stop_loading(&mut guard, id);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Expand every node in the hierarchy.
    pub fn expand_all(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let ids = utils::all_node_ids(&guard.roots);
            guard.store.expand_all(ids);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Collapse every node, cancelling all loading indicators.
    pub fn collapse_all(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.store.collapse_all();
            guard.timers.cancel_all();
            guard.store.clear_loading();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check if a node is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.store.is_expanded(id))
            .unwrap_or(false)
    }

    /// Get all expanded ids, sorted.
    pub fn expanded_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.store.expanded_ids())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Marks `id` loading and schedules the flag to clear after `duration`.
    fn start_loading(&self, inner: &mut ExplorerInner, id: &str, duration: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("[explorer] no tokio runtime; skipping loading indicator for {}", id);
            return;
        };

        inner.store.set_node_loading(id, true);
        let generation = inner.timers.next_generation();
        let shutdown = inner.timers.shutdown_token();
        let weak: Weak<RwLock<ExplorerInner>> = Arc::downgrade(&self.inner);
        let dirty = Arc::clone(&self.dirty);
        let node_id = id.to_string();

        let handle = runtime.spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    finish_loading(&weak, &dirty, &node_id, generation);
                }
            }
        });
        inner.timers.insert(id, generation, handle);
        log::debug!("[explorer] loading {} for {:?}", id, duration);
    }

    fn stop_loading(inner: &mut ExplorerInner, id: &str) {
        inner.timers.cancel(id);
        inner.store.set_node_loading(id, false);
    }

    /// Check if a node shows a loading indicator.
    pub fn is_loading(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.store.is_loading(id))
            .unwrap_or(false)
    }

    /// Get all loading ids, sorted.
    pub fn loading_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.store.loading_ids())
            .unwrap_or_default()
    }

    /// Number of loading timers that have not fired yet.
    pub fn pending_loading_timers(&self) -> usize {
        self.inner.read().map(|g| g.timers.len()).unwrap_or(0)
    }

    /// Cancel every outstanding loading timer and clear all loading flags.
    ///
    /// Call when the presentation layer tears the explorer down while
    /// clones may still be alive.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.timers.cancel_all();
            guard.store.clear_loading();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle a node's selection on user intent.
    ///
    /// Selecting cascades to the whole subtree and is rejected when the node
    /// is not selectable; deselecting is always allowed. On success the
    /// tri-states are recomputed and a
    /// [`SelectionChanged`](TreeEvent::SelectionChanged) event is queued.
    /// Errors leave the state untouched and queue nothing.
    pub fn toggle_selection(&self, id: &str) -> Result<SelectionChange, SelectionError> {
        let Ok(mut guard) = self.inner.write() else {
            return Err(SelectionError::not_found(id));
        };
        let inner = &mut *guard;
        let node =
            utils::find_by_id(id, &inner.roots).ok_or_else(|| SelectionError::not_found(id))?;

        if !inner.store.is_selected(id)
            && let Selectability::Disabled { reason } = inner.config.selectability(node)
        {
            log::debug!("[explorer] selection of {} rejected: {}", id, reason);
            return Err(SelectionError::rejected(id, reason));
        }

        inner.store.toggle_selection(node);
        inner.store.recompute_selection_states(&inner.roots);

        let change = selection_change(inner);
        inner.events.push(TreeEvent::SelectionChanged(change.clone()));
        self.dirty.store(true, Ordering::SeqCst);
        Ok(change)
    }

    /// Add ids to the selection without cascading, then recompute.
    pub fn select_nodes<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            inner.store.select_nodes(ids);
            inner.store.recompute_selection_states(&inner.roots);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove ids from the selection without cascading, then recompute.
    pub fn deselect_nodes<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            inner.store.deselect_nodes(ids);
            inner.store.recompute_selection_states(&inner.roots);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Clear the selection and queue a selection event.
    pub fn clear_selection(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.store.clear_selection();
            guard
                .events
                .push(TreeEvent::SelectionChanged(SelectionChange::default()));
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get all selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.store.selected_ids())
            .unwrap_or_default()
    }

    /// Get the selected nodes present in the hierarchy.
    pub fn selected_nodes(&self) -> Vec<TreeNode> {
        self.inner
            .read()
            .map(|g| selection_change(&g).selected_nodes)
            .unwrap_or_default()
    }

    /// Check if a node is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.store.is_selected(id))
            .unwrap_or(false)
    }

    /// Get a node's derived tri-state.
    pub fn selection_state(&self, id: &str) -> SelectionState {
        self.inner
            .read()
            .map(|g| g.store.selection_state(id))
            .unwrap_or_default()
    }

    /// Get whether a node can be newly selected, or `None` if unknown.
    pub fn selectability(&self, id: &str) -> Option<Selectability> {
        self.resolve(id, TreeConfig::selectability)
    }

    /// Check if a node can be newly selected (`false` if unknown).
    pub fn is_selectable(&self, id: &str) -> bool {
        self.selectability(id)
            .is_some_and(|selectability| selectability.is_selectable())
    }

    // -------------------------------------------------------------------------
    // Pass-through events
    // -------------------------------------------------------------------------

    /// Get the context menu entries (empty when the menu is disabled).
    pub fn context_menu_items(&self) -> Vec<ContextMenuItem> {
        self.inner
            .read()
            .map(|g| {
                if g.config.show_context_menu {
                    g.config.context_menu_items.clone()
                } else {
                    Vec::new()
                }
            })
            .unwrap_or_default()
    }

    /// Forward a context menu action with its resolved node.
    ///
    /// Returns `false` if the node is unknown.
    pub fn menu_action(&self, action: MenuAction) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let Some(node) = utils::find_by_id(&action.node_id, &guard.roots).cloned() else {
            return false;
        };
        guard.events.push(TreeEvent::MenuAction { action, node });
        true
    }

    /// Forward a row click. Clicking a node with children also toggles it.
    ///
    /// Returns `false` if the node is unknown.
    pub fn click_node(&self, id: &str) -> bool {
        let Some(node) = self.find(id) else {
            return false;
        };
        let has_children = node.has_children();
        if let Ok(mut guard) = self.inner.write() {
            guard.events.push(TreeEvent::NodeClicked { node });
        }
        if has_children {
            self.toggle_expansion(id);
        }
        true
    }

    /// Forward a row double-click.
    ///
    /// Returns `false` if the node is unknown.
    pub fn double_click_node(&self, id: &str) -> bool {
        let Some(node) = self.find(id) else {
            return false;
        };
        if let Ok(mut guard) = self.inner.write() {
            guard.events.push(TreeEvent::NodeDoubleClicked { node });
        }
        true
    }

    /// Take all queued events.
    pub fn drain_events(&self) -> Vec<TreeEvent> {
        self.inner
            .write()
            .map(|mut g| std::mem::take(&mut g.events))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Get a deep copy of the session state.
    pub fn snapshot(&self) -> TreeState {
        self.inner
            .read()
            .map(|g| g.store.snapshot())
            .unwrap_or_default()
    }

    /// Restore session state from a snapshot.
    ///
    /// Pending loading timers are cancelled; loading flags in the snapshot
    /// are dropped since no timer would clear them.
    pub fn restore_snapshot(&self, snapshot: TreeState) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            inner.timers.cancel_all();
            inner.store.restore_snapshot(snapshot);
            inner.store.clear_loading();
            inner.store.recompute_selection_states(&inner.roots);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the projection may have changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for TreeExplorer {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

/// Runs structural checks and logs each warning.
fn validate(roots: &[TreeNode]) -> Vec<StructuralWarning> {
    let warnings = utils::validate_structure(roots);
    for warning in &warnings {
        log::warn!("[explorer] {}", warning);
    }
    warnings
}

/// Seeds the selection from configured ids without cascading.
///
/// The recompute keeps an interior id only when all its children are
/// selected too.
fn apply_preselection(store: &mut TreeStateStore, roots: &[TreeNode], ids: &[String]) {
    if ids.is_empty() {
        return;
    }
    store.select_nodes(ids.iter().map(String::as_str));
    store.recompute_selection_states(roots);
    log::debug!("[explorer] preselected {} ids", ids.len());
}

/// Materializes the current selection.
fn selection_change(inner: &ExplorerInner) -> SelectionChange {
    let selected_ids = inner.store.selected_ids();
    let index = utils::build_node_index(&inner.roots);
    let selected_nodes = selected_ids
        .iter()
        .filter_map(|id| index.get(id.as_str()).map(|node| (*node).clone()))
        .collect();
    SelectionChange {
        selected_ids,
        selected_nodes,
    }
}

/// Timer body: clears the loading flag if this timer is still current.
fn finish_loading(weak: &Weak<RwLock<ExplorerInner>>, dirty: &AtomicBool, id: &str, generation: u64) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = inner.write() else {
        return;
    };
    if guard.timers.complete(id, generation) {
        guard.store.set_node_loading(id, false);
        guard.events.push(TreeEvent::LoadingFinished { id: id.to_string() });
        dirty.store(true, Ordering::SeqCst);
        log::debug!("[explorer] loading finished for {}", id);
    }
}
