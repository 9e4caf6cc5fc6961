//! Property tests: random operation sequences never break the document
//! lifecycle invariants.

use proptest::prelude::*;
use signflow_engine::*;
use signflow_types::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
enum Op {
    Sign { role: SignerRole, blank: bool },
    Reject { role: SignerRole, reason: Option<String> },
    Validate,
    Edit(String),
}

fn arb_role() -> impl Strategy<Value = SignerRole> {
    prop::sample::select(SignerRole::ALL.to_vec())
}

/// Non-empty, duplicate-free set of required roles
fn arb_roles() -> impl Strategy<Value = Vec<SignerRole>> {
    prop::sample::subsequence(SignerRole::ALL.to_vec(), 1..=SignerRole::ALL.len())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (arb_role(), prop::bool::weighted(0.1))
            .prop_map(|(role, blank)| Op::Sign { role, blank }),
        1 => (arb_role(), prop::option::of("[a-z ]{0,12}"))
            .prop_map(|(role, reason)| Op::Reject { role, reason }),
        1 => Just(Op::Validate),
        1 => "[a-z]{0,8}".prop_map(Op::Edit),
    ]
}

fn make_document(engine: &WorkflowEngine, roles: &[SignerRole]) -> DocumentRecord {
    let template = DocumentTemplate::new("prop", "Property template", DocumentType::InternshipAgreement)
        .with_required_signatures(roles.iter().copied());
    engine
        .create_document(&template, StudentId::new("stu-prop"), None, "Property", "")
        .unwrap()
}

fn apply(engine: &WorkflowEngine, doc: &DocumentRecord, op: &Op) -> DocumentResult<DocumentRecord> {
    match op {
        Op::Sign { role, blank } => {
            let image = if *blank {
                SignatureImage::new("  ")
            } else {
                SignatureImage::new(format!("img://{}", role))
            };
            engine.submit_signature(doc, *role, image)
        }
        Op::Reject { role, reason } => engine.reject_signature(doc, *role, reason.clone()),
        Op::Validate => engine.validate(doc),
        Op::Edit(content) => engine.update_content(doc, content),
    }
}

fn check_invariants(doc: &DocumentRecord, required: usize) {
    assert_eq!(doc.signatures().len(), required, "signature count drifted");
    assert!(doc.signatures().iter().all(|s| s.is_consistent()));
    doc.check_invariants().unwrap();

    let all_signed = doc.signatures().iter().all(|s| s.is_signed());
    let any_rejected = doc.signatures().iter().any(|s| s.is_rejected());
    match doc.status() {
        DocumentStatus::Signed | DocumentStatus::Validated => assert!(all_signed),
        DocumentStatus::Rejected => assert!(any_rejected),
        DocumentStatus::Draft | DocumentStatus::PendingSignature => {
            assert!(!all_signed);
            assert!(!any_rejected);
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Slot count is fixed at creation and signed means every slot signed.
    #[test]
    fn invariants_hold_after_every_step(
        roles in arb_roles(),
        ops in prop::collection::vec(arb_op(), 0..24),
    ) {
        let engine = WorkflowEngine::new();
        let mut doc = make_document(&engine, &roles);
        check_invariants(&doc, roles.len());

        for op in &ops {
            if let Ok(next) = apply(&engine, &doc, op) {
                doc = next;
            }
            check_invariants(&doc, roles.len());
        }
    }

    /// Status never moves backwards; the only exit from the forward chain is rejection.
    #[test]
    fn status_progresses_monotonically(
        roles in arb_roles(),
        ops in prop::collection::vec(arb_op(), 0..24),
    ) {
        let engine = WorkflowEngine::new();
        let mut doc = make_document(&engine, &roles);

        for op in &ops {
            let before = doc.status();
            if let Ok(next) = apply(&engine, &doc, op) {
                doc = next;
            }
            let after = doc.status();
            if before == after {
                continue;
            }
            prop_assert!(before.can_transition_to(after), "{} -> {}", before, after);
            if let (Some(from), Some(to)) = (before.progress_rank(), after.progress_rank()) {
                prop_assert!(from < to);
            }
        }
    }

    /// Once terminal, every operation fails and the record is left as it was.
    #[test]
    fn terminal_documents_are_locked(
        roles in arb_roles(),
        reject_first in any::<bool>(),
        ops in prop::collection::vec(arb_op(), 1..12),
    ) {
        let engine = WorkflowEngine::new();
        let mut doc = make_document(&engine, &roles);
        if reject_first {
            doc = engine.reject_signature(&doc, roles[0], None).unwrap();
        } else {
            for role in &roles {
                doc = engine.submit_signature(&doc, *role, SignatureImage::new("img")).unwrap();
            }
            doc = engine.validate(&doc).unwrap();
        }
        prop_assert!(doc.is_terminal());

        let frozen = serde_json::to_string(&doc).unwrap();
        for op in &ops {
            let result = apply(&engine, &doc, op);
            let is_terminated = matches!(result, Err(DocumentError::DocumentTerminated { .. }));
            prop_assert!(is_terminated);
        }
        prop_assert_eq!(serde_json::to_string(&doc).unwrap(), frozen);
    }

    /// Submitting the same signature twice equals submitting it once.
    #[test]
    fn resubmission_is_idempotent(roles in arb_roles(), pick in any::<prop::sample::Index>()) {
        let engine = WorkflowEngine::new();
        let doc = make_document(&engine, &roles);
        let role = roles[pick.index(roles.len())];

        let once = engine.submit_signature(&doc, role, SignatureImage::new("img")).unwrap();
        let twice = engine.submit_signature(&once, role, SignatureImage::new("img")).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Signing every required role in any order ends in `signed`.
    #[test]
    fn any_signing_order_completes(
        roles in arb_roles().prop_shuffle(),
    ) {
        let engine = WorkflowEngine::new();
        let mut doc = make_document(&engine, &roles);
        for (i, role) in roles.iter().enumerate() {
            doc = engine.submit_signature(&doc, *role, SignatureImage::new("img")).unwrap();
            let expected = if i + 1 == roles.len() {
                DocumentStatus::Signed
            } else {
                DocumentStatus::PendingSignature
            };
            prop_assert_eq!(doc.status(), expected);
        }
    }
}
