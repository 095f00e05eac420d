/// Stable identity of an element across frames.
///
/// Ids are 32-bit one-at-a-time hashes of a label. Zero is reserved for
/// "no element" and is never produced by the constructors.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub const NONE: ElementId = ElementId(0);

    pub fn new(label: &str) -> Self {
        Self(hash_label(label, 0, 0))
    }

    /// Id for the `index`-th item of a repeated label (list rows, menu items).
    pub fn indexed(label: &str, index: u32) -> Self {
        Self(hash_label(label, index, 0))
    }

    /// Id for an anonymous element, derived from its parent and sibling slot.
    pub(crate) fn child_of(parent: ElementId, slot: u32) -> Self {
        Self(hash_number(slot, parent.0))
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

fn mix(mut hash: u32, value: u32) -> u32 {
    hash = hash.wrapping_add(value);
    hash = hash.wrapping_add(hash << 10);
    hash ^ (hash >> 6)
}

fn finish(mut hash: u32) -> u32 {
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    // 0 is reserved for NONE.
    hash.wrapping_add(1).max(1)
}

fn hash_label(label: &str, offset: u32, seed: u32) -> u32 {
    let mut hash = seed;
    for b in label.bytes() {
        hash = mix(hash, u32::from(b));
    }
    hash = mix(hash, offset);
    finish(hash)
}

fn hash_number(offset: u32, seed: u32) -> u32 {
    let hash = mix(seed, offset.wrapping_add(48));
    finish(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_label_same_id() {
        assert_eq!(ElementId::new("Sidebar"), ElementId::new("Sidebar"));
    }

    #[test]
    fn different_labels_differ() {
        assert_ne!(ElementId::new("Sidebar"), ElementId::new("HeaderBar"));
    }

    #[test]
    fn indexed_ids_are_distinct_per_index() {
        let a = ElementId::indexed("Row", 0);
        let b = ElementId::indexed("Row", 1);
        assert_ne!(a, b);
        assert_ne!(a, ElementId::new("Row1"));
    }

    #[test]
    fn ids_are_never_none() {
        assert!(!ElementId::new("").is_none());
        assert!(!ElementId::child_of(ElementId::NONE, 0).is_none());
    }

    #[test]
    fn child_ids_depend_on_parent_and_slot() {
        let p = ElementId::new("Parent");
        assert_ne!(ElementId::child_of(p, 0), ElementId::child_of(p, 1));
        assert_ne!(ElementId::child_of(p, 0), ElementId::child_of(ElementId::new("Other"), 0));
    }
}
