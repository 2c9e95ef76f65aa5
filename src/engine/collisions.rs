//! Derived-identity collision repair.
//!
//! Directives can freely rename operations into each other, so a final pass —
//! independent of any directive — guarantees every operation's derived
//! identity (`verb-subject[_variant]`) is unique. The pass is greedy and
//! order-dependent: operations keep their first-come identity, and a colliding
//! operation has trailing digits stripped from its variant and a run-wide
//! counter appended until the identity is free. Deterministic for a fixed
//! operation order, and a no-op on an already-unique set.

use crate::model::Operation;
use std::collections::HashSet;

pub(crate) fn resolve_collisions(operations: &mut [Operation]) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut counter = 1u32;

    for op in operations.iter_mut() {
        let mut identity = op.identity();
        while seen.contains(&identity) {
            let stem = op.variant.trim_end_matches(|c: char| c.is_ascii_digit()).to_string();
            op.variant = format!("{stem}{counter}");
            counter += 1;
            identity = op.identity();
        }
        seen.insert(identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(verb: &str, subject: &str, variant: &str) -> Operation {
        Operation {
            verb: verb.into(),
            subject: subject.into(),
            variant: variant.into(),
            ..Default::default()
        }
    }

    #[test]
    fn colliding_triple_gets_numbered_variants() {
        let mut ops =
            vec![op("Get", "Widget", ""), op("Get", "Widget", ""), op("Get", "Widget", "")];
        resolve_collisions(&mut ops);

        assert_eq!(ops[0].variant, "");
        assert_eq!(ops[1].variant, "1");
        assert_eq!(ops[2].variant, "2");
        assert_eq!(ops[1].identity(), "Get-Widget_1");
        assert_eq!(ops[2].identity(), "Get-Widget_2");
    }

    #[test]
    fn trailing_digits_are_stripped_before_numbering() {
        let mut ops = vec![op("Get", "Widget", "Via1"), op("Get", "Widget", "Via1")];
        resolve_collisions(&mut ops);

        assert_eq!(ops[0].variant, "Via1");
        assert_eq!(ops[1].variant, "Via2");
    }

    #[test]
    fn unique_set_is_untouched_and_pass_is_idempotent() {
        let mut ops = vec![op("Get", "Widget", ""), op("List", "Widget", ""), op("Get", "Gadget", "")];
        let before = ops.clone();

        resolve_collisions(&mut ops);
        assert_eq!(ops, before);
        resolve_collisions(&mut ops);
        assert_eq!(ops, before);
    }

    #[test]
    fn repaired_set_stays_stable_on_a_second_run() {
        let mut ops = vec![op("Get", "Widget", ""), op("Get", "Widget", "")];
        resolve_collisions(&mut ops);
        let repaired = ops.clone();

        resolve_collisions(&mut ops);
        assert_eq!(ops, repaired);
    }

    #[test]
    fn distinct_subjects_never_collide() {
        let mut ops = vec![op("Get", "Widget", ""), op("Get", "Gadget", "")];
        let before = ops.clone();
        resolve_collisions(&mut ops);
        assert_eq!(ops, before);
    }
}
