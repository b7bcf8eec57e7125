//! Grouping of members by owning type.

use std::collections::HashMap;

use crate::kind::Kind;
use crate::member::Member;

/// All members sharing one owning-type identifier, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Raw owning-type identifier.
    pub key: String,
    pub members: Vec<Member>,
}

impl Group {
    /// The type member this group's page is built around.
    ///
    /// First type member whose short name does not mention `namespace`
    /// (case-insensitive). `None` means the group produces no page.
    #[must_use]
    pub fn page_member(&self) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.kind() == Kind::Type && !m.is_namespace_marker())
    }

    /// Members of the given kind, in input order.
    pub fn members_of(&self, kind: Kind) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.kind() == kind)
    }
}

/// Partition members by owning type.
///
/// Groups appear in first-seen order; members keep their input order
/// within each group.
#[must_use]
pub fn group_by_owning_type(members: Vec<Member>) -> Vec<Group> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for member in members {
        let key = member.owning_type().to_owned();
        if let Some(&i) = index.get(&key) {
            groups[i].members.push(member);
        } else {
            index.insert(key.clone(), groups.len());
            groups.push(Group {
                key,
                members: vec![member],
            });
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ApiDocument;
    use crate::member::parse_members;

    fn members(names: &[&str]) -> Vec<Member> {
        let entries: String = names
            .iter()
            .map(|n| format!(r#"<member name="{n}"/>"#))
            .collect();
        let doc = ApiDocument::parse(&format!("<doc><members>{entries}</members></doc>")).unwrap();
        parse_members(&doc)
    }

    #[test]
    fn test_group_by_owning_type() {
        let groups = group_by_owning_type(members(&[
            "T:Acme.Widget",
            "M:Acme.Widget.Do",
            "T:Acme.Gadget",
            "P:Acme.Widget.Name",
            "F:Acme.Gadget.Max",
        ]));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Acme.Widget");
        assert_eq!(groups[0].members.len(), 3);
        assert_eq!(groups[1].key, "Acme.Gadget");
        assert_eq!(groups[1].members.len(), 2);
    }

    #[test]
    fn test_grouping_is_partition() {
        let input = members(&[
            "T:A",
            "M:A.X",
            "M:B.Y",
            "T:B",
            "P:C.Z",
            "F:A.W",
            "M:A.#ctor",
        ]);
        let total = input.len();

        let groups = group_by_owning_type(input);

        let grouped: usize = groups.iter().map(|g| g.members.len()).sum();
        assert_eq!(grouped, total);
        for group in &groups {
            assert!(group.members.iter().all(|m| m.owning_type() == group.key));
        }
        let mut keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), groups.len());
    }

    #[test]
    fn test_group_preserves_member_order() {
        let groups = group_by_owning_type(members(&["M:A.First", "T:A", "M:A.Second"]));

        let names: Vec<_> = groups[0].members.iter().map(|m| m.short_name.as_str()).collect();
        assert_eq!(names, vec!["First", "A", "Second"]);
    }

    #[test]
    fn test_page_member_found() {
        let groups = group_by_owning_type(members(&["M:A.Do", "T:A"]));

        assert_eq!(groups[0].page_member().map(|m| m.short_name.as_str()), Some("A"));
    }

    #[test]
    fn test_group_without_type_has_no_page() {
        let groups = group_by_owning_type(members(&["M:Orphan.Do", "P:Orphan.Name"]));

        assert!(groups[0].page_member().is_none());
    }

    #[test]
    fn test_namespace_group_has_no_page() {
        let groups = group_by_owning_type(members(&["T:Acme.Namespace"]));

        assert_eq!(groups.len(), 1);
        assert!(groups[0].page_member().is_none());
    }

    #[test]
    fn test_page_count_matches_eligible_groups() {
        let groups = group_by_owning_type(members(&[
            "T:Acme.Widget",
            "T:Acme.NAMESPACE",
            "M:Acme.Orphan.Do",
            "T:Acme.Gadget",
            "M:Acme.Gadget.#ctor",
        ]));

        let pages = groups.iter().filter(|g| g.page_member().is_some()).count();
        assert_eq!(pages, 2);
    }

    #[test]
    fn test_members_of_kind() {
        let groups = group_by_owning_type(members(&["T:A", "M:A.X", "M:A.#ctor", "M:A.Y"]));

        assert_eq!(groups[0].members_of(Kind::Method).count(), 2);
        assert_eq!(groups[0].members_of(Kind::Constructor).count(), 1);
    }
}
