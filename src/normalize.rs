//! Table-driven response normalization for write-back safety.
//!
//! GET responses embed fields the service assigns on its side (timestamps, parent
//! identifiers, embedded error blocks) and rejects when they come back in a write body.
//! Each resource kind carries its strip list as data so the rules live in one table
//! instead of being repeated at every call site.

// crates.io
use serde_json::Value;

/// Server-assigned timestamps present on every stored resource.
const RULESET_STRIP: &[&str] = &["updatedAt", "createdAt"];
/// Rule fields assigned by the service on create.
const RULE_STRIP: &[&str] = &["rulesetId", "updatedAt", "createdAt"];
/// Embedded error block returned alongside tag listings.
const TAG_STRIP: &[&str] = &["errors"];
/// Key under which a ruleset's verbose rule listing nests its elements.
const RULES_COLLECTION: &str = "rules";

/// Resource shapes the client knows how to make write-compatible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	/// The ruleset listing; not intended for write replay, returned verbatim.
	RulesetList,
	/// A single ruleset with its rule identifiers.
	Ruleset,
	/// A ruleset's verbose rule listing; elements normalize independently.
	RuleList,
	/// A single rule.
	Rule,
	/// A rule's tag listing.
	TagList,
}
impl ResourceKind {
	/// Fields stripped from the value's top level.
	const fn stripped_fields(self) -> &'static [&'static str] {
		match self {
			ResourceKind::RulesetList | ResourceKind::RuleList => &[],
			ResourceKind::Ruleset => RULESET_STRIP,
			ResourceKind::Rule => RULE_STRIP,
			ResourceKind::TagList => TAG_STRIP,
		}
	}

	/// Nested collection whose elements normalize under another kind.
	const fn nested(self) -> Option<(&'static str, ResourceKind)> {
		match self {
			ResourceKind::RuleList => Some((RULES_COLLECTION, ResourceKind::Rule)),
			_ => None,
		}
	}
}

/// Strips server-assigned fields so `value` can be replayed as a write body unmodified.
///
/// Absent fields are skipped, non-object values pass through untouched, and re-applying
/// the pass to its own output changes nothing.
pub fn normalize(kind: ResourceKind, mut value: Value) -> Value {
	strip_in_place(kind, &mut value);

	value
}

fn strip_in_place(kind: ResourceKind, value: &mut Value) {
	let Some(object) = value.as_object_mut() else {
		return;
	};

	for field in kind.stripped_fields() {
		object.remove(*field);
	}

	if let Some((collection, element_kind)) = kind.nested() {
		if let Some(Value::Array(elements)) = object.get_mut(collection) {
			for element in elements {
				strip_in_place(element_kind, element);
			}
		}
	}
}
