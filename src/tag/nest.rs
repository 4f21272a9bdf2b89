use crate::types::{FunctionTag, RawRecord};

/// Partition a start-ordered record list into a forest by positional
/// containment: each record claims as children every following record that
/// starts before its own end. `boundary` is exclusive: a record starting
/// exactly at its would-be parent's end is a sibling, not a child.
///
/// Returns the tags claimed below `boundary` and the unconsumed remainder.
pub fn build(records: &[RawRecord], boundary: usize) -> (Vec<FunctionTag>, &[RawRecord]) {
    let mut tags = Vec::new();
    let mut rest = records;
    while let Some((head, tail)) = rest.split_first() {
        if head.start >= boundary {
            break;
        }
        let (children, remainder) = build(tail, head.end);
        tags.push(head.clone().into_tag(children));
        rest = remainder;
    }
    (tags, rest)
}

/// Build the full forest for a text of `len` bytes.
pub fn forest(records: &[RawRecord], len: usize) -> Vec<FunctionTag> {
    build(records, len).0
}
