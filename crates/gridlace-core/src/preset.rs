//! Named parameter presets.

/// A named set of parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset<P> {
    /// Display name, e.g. `"6x6 Tricky"`.
    pub name: String,
    /// The parameters.
    pub params: P,
}

impl<P> Preset<P> {
    /// Creates a preset.
    pub fn new(name: impl Into<String>, params: P) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// A caller-owned list of presets.
///
/// # Examples
///
/// ```
/// use gridlace_core::{Preset, PresetCatalog};
///
/// let catalog = PresetCatalog::new(vec![
///     Preset::new("Small", 4_u8),
///     Preset::new("Large", 9_u8),
/// ]);
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.default_preset().map(|p| p.params), Some(4));
/// assert_eq!(catalog.find("large").map(|p| p.params), Some(9));
/// assert!(catalog.get(2).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCatalog<P> {
    presets: Vec<Preset<P>>,
}

impl<P> PresetCatalog<P> {
    /// Creates a catalog. The first preset is the default.
    #[must_use]
    pub fn new(presets: Vec<Preset<P>>) -> Self {
        Self { presets }
    }

    /// Returns the number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns `true` if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Returns the preset at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Preset<P>> {
        self.presets.get(index)
    }

    /// Looks up a preset by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Preset<P>> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the first preset.
    #[must_use]
    pub fn default_preset(&self) -> Option<&Preset<P>> {
        self.presets.first()
    }

    /// Iterates over the presets in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Preset<P>> {
        self.presets.iter()
    }
}

impl<'a, P> IntoIterator for &'a PresetCatalog<P> {
    type Item = &'a Preset<P>;
    type IntoIter = std::slice::Iter<'a, Preset<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
