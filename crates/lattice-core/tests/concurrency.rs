//! Consultas concurrentes sobre el mismo servicio sin coordinación.


use lattice_core::{ArtifactKind, ArtifactResponse};
use test_support::*;

#[test]
fn parallel_readers_see_identical_results() {
    let fx = fixture();
    let svc = service(&fx);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|i| {
                                        let svc = &svc;
                                        let id = fx.dispatch_id;
                                        scope.spawn(move || {
                                                 let kind = ArtifactKind::ALL[i % ArtifactKind::ALL.len()];
                                                 let summary = svc.get_summary(id).unwrap();
                                                 let resp = svc.get_artifact(id, &kind.into()).unwrap();
                                                 (kind, summary, resp)
                                             })
                                    })
                                    .collect();
        for h in handles {
            let (kind, summary, resp) = h.join().unwrap();
            assert_eq!(summary, fx.summary);
            let value = match resp {
                ArtifactResponse::Data { data } => data.unwrap(),
                ArtifactResponse::Executor { details, .. } | ArtifactResponse::WorkflowExecutor { details, .. } => details,
            };
            assert_eq!(value, expected_value(kind));
        }
    });
}
