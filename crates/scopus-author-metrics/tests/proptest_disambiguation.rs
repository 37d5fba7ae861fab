//! Property-based tests for candidate selection.

use proptest::prelude::*;
use scopus_author_metrics::models::{Candidate, profile_link};
use scopus_author_metrics::resolver::{AffiliationPolicy, select_candidate};

/// Affiliation/city pairs that never contain a preferred substring.
fn arb_plain() -> impl Strategy<Value = (Option<String>, Option<String>)> {
    (
        proptest::option::of("[a-z ]{0,20}"),
        proptest::option::of("[a-z ]{0,12}"),
    )
}

/// Pairs that always match through either field.
fn arb_preferred() -> impl Strategy<Value = (Option<String>, Option<String>)> {
    prop_oneof![
        "[a-z ]{0,8}".prop_map(|p| (Some(format!("{p}University of North Carolina")), None)),
        "[a-z ]{0,8}".prop_map(|p| (Some(format!("{p} NC State")), Some("Elsewhere".to_string()))),
        "[a-z ]{0,8}".prop_map(|p| (None, Some(format!("{p}Chapel Hill")))),
        "[a-z ]{0,8}".prop_map(|p| (Some("Other".to_string()), Some(format!("{p}Raleigh")))),
    ]
}

fn build(pairs: Vec<(Option<String>, Option<String>)>) -> Vec<Candidate> {
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (affiliation, city))| Candidate {
            eid: format!("9-s2.0-{i}"),
            surname: None,
            given_name: None,
            affiliation,
            city,
            country: None,
        })
        .collect()
}

proptest! {
    /// The first preferred candidate wins regardless of what follows it.
    #[test]
    fn first_preferred_candidate_wins(
        before in proptest::collection::vec(arb_plain(), 0..8),
        hit in arb_preferred(),
        after in proptest::collection::vec(prop_oneof![arb_plain(), arb_preferred()], 0..8),
    ) {
        let k = before.len();
        let mut pairs = before;
        pairs.push(hit);
        pairs.extend(after);
        let candidates = build(pairs);

        let selection = select_candidate(&candidates, &AffiliationPolicy::default()).unwrap();
        prop_assert_eq!(selection.index, k);
        prop_assert_eq!(&selection.candidate.eid, &candidates[k].eid);
        prop_assert!(!selection.low_confidence);
    }

    /// Without any preferred candidate the first element is chosen and flagged.
    #[test]
    fn no_preferred_candidate_selects_first(
        pairs in proptest::collection::vec(arb_plain(), 1..12),
    ) {
        let candidates = build(pairs);

        let selection = select_candidate(&candidates, &AffiliationPolicy::default()).unwrap();
        prop_assert_eq!(selection.index, 0);
        prop_assert!(selection.low_confidence);
    }

    /// Profile links always embed the third dash-separated segment.
    #[test]
    fn profile_link_embeds_third_segment(
        a in "[0-9a-z.]{1,5}",
        b in "[0-9a-z.]{1,5}",
        c in "[0-9]{1,12}",
        rest in proptest::option::of("[0-9a-z]{1,5}"),
    ) {
        let eid = match &rest {
            Some(r) => format!("{a}-{b}-{c}-{r}"),
            None => format!("{a}-{b}-{c}"),
        };
        let link = profile_link(&eid).unwrap();
        let expected = format!("authorId={}", c);
        prop_assert!(link.ends_with(&expected), "{} does not end with {}", link, expected);
    }
}
