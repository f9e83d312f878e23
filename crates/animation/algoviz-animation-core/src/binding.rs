//! Binding table and element resolver.
//!
//! Logical ids from the operation log are resolved to opaque target handles
//! once per rebuild. The table caches those resolutions so an id that appears
//! in many ops hits the resolver only once.

use hashbrown::HashMap;

use algoviz_algo_core::Namespace;

/// Opaque target handle (small string key chosen by the host).
pub type TargetHandle = String;

/// Key of one logical element: its namespace and algorithm-assigned id.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementKey {
    pub namespace: Namespace,
    pub id: String,
}

impl ElementKey {
    pub fn new(namespace: Namespace, id: impl Into<String>) -> Self {
        Self {
            namespace,
            id: id.into(),
        }
    }
}

/// Resolves logical ids to mounted element handles.
/// Hosts implement this over whatever they rendered.
pub trait ElementResolver {
    fn resolve(&mut self, namespace: Namespace, id: &str) -> Option<TargetHandle>;

    /// Primary input cells, in index order.
    fn cells(&self) -> Vec<TargetHandle>;

    /// Element that shows the final result, if the host mounted one.
    fn result_label(&self) -> Option<TargetHandle> {
        None
    }
}

/// Per-build resolution cache.
#[derive(Default, Debug)]
pub struct BindingTable {
    rows: HashMap<ElementKey, TargetHandle>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ElementKey) -> Option<&TargetHandle> {
        self.rows.get(key)
    }

    /// Insert or update the handle for a key.
    pub fn upsert(&mut self, key: ElementKey, handle: TargetHandle) {
        self.rows.insert(key, handle);
    }

    /// Cached handle, or ask `resolver` and remember the answer.
    pub fn resolve<R: ElementResolver + ?Sized>(
        &mut self,
        resolver: &mut R,
        namespace: Namespace,
        id: &str,
    ) -> Option<TargetHandle> {
        let key = ElementKey::new(namespace, id);
        if let Some(handle) = self.rows.get(&key) {
            return Some(handle.clone());
        }
        let handle = resolver.resolve(namespace, id)?;
        self.upsert(key, handle.clone());
        Some(handle)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolver over handles registered up front.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    handles: HashMap<ElementKey, TargetHandle>,
    cells: Vec<TargetHandle>,
    result: Option<TargetHandle>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, namespace: Namespace, id: impl Into<String>, handle: impl Into<TargetHandle>) {
        self.handles.insert(ElementKey::new(namespace, id), handle.into());
    }

    /// Register the next primary cell; it is also resolvable by id.
    pub fn push_cell(&mut self, id: impl Into<String>, handle: impl Into<TargetHandle>) {
        let handle = handle.into();
        self.cells.push(handle.clone());
        self.insert(Namespace::Cell, id, handle);
    }

    pub fn set_result(&mut self, handle: impl Into<TargetHandle>) {
        self.result = Some(handle.into());
    }

    /// Forget a handle, as when the host unmounts an element.
    pub fn unmount(&mut self, namespace: Namespace, id: &str) -> Option<TargetHandle> {
        self.handles.remove(&ElementKey::new(namespace, id))
    }
}

impl ElementResolver for MapResolver {
    fn resolve(&mut self, namespace: Namespace, id: &str) -> Option<TargetHandle> {
        self.handles.get(&ElementKey::new(namespace, id)).cloned()
    }

    fn cells(&self) -> Vec<TargetHandle> {
        self.cells.clone()
    }

    fn result_label(&self) -> Option<TargetHandle> {
        self.result.clone()
    }
}
