use super::error::{CredentialCreationError, IndexCreationError, InitError};
use super::provisioning::{AppUserSpec, IndexSpec, APP_USER, INDEX_PLAN};
use std::sync::Arc;
use tracing::info;

/// Abstraction over the external database's administrative surface.
///
/// The initializer issues declarative creation requests through this trait;
/// it owns nothing itself. Implementations hold the administrative session
/// for the duration of the run.
#[async_trait::async_trait]
pub trait Initializer: Send + Sync {
    // ---
    /// Request creation of the application principal with its role grants.
    async fn create_application_user(
        &self,
        spec: &AppUserSpec,
    ) -> Result<(), CredentialCreationError>;

    /// Request that a collection maintain an index over the given fields.
    /// Returns the name assigned to the index by the external system.
    async fn create_index(&self, spec: &IndexSpec) -> Result<String, IndexCreationError>;
}

/// Type alias for any backend that implements Initializer.
pub type InitializerPtr = Arc<dyn Initializer>;

/// Outcome of a completed run, used for the final success notice and logging.
#[derive(Debug)]
pub struct InitReport {
    /// Username of the created principal.
    pub user: String,
    /// Server-assigned names of the created indexes, in declaration order.
    pub indexes: Vec<String>,
}

impl InitReport {
    /// The single human-readable success notice printed on completion.
    pub fn notice(&self) -> &'static str {
        // ---
        "MongoDB initialization completed successfully!"
    }
}

/// Runs the full initialization sequence: the application user first, then
/// every index declaration in plan order.
///
/// Strictly sequential and fail-fast: each request is awaited before the next
/// is issued, and the first failure aborts the remainder.
///
/// # Errors
/// Returns the typed error of the first failing request. No retry is
/// attempted; re-running against an already-initialized instance fails here
/// on the duplicate principal.
#[tracing::instrument(skip(initializer))]
pub async fn run_initialization(initializer: &dyn Initializer) -> Result<InitReport, InitError> {
    // ---
    initializer.create_application_user(&APP_USER).await?;
    info!(user = APP_USER.username, "created application user");

    let mut indexes = Vec::with_capacity(INDEX_PLAN.len());
    for spec in INDEX_PLAN {
        let name = initializer.create_index(spec).await?;
        info!(index = %spec.describe(), name = %name, "created index");
        indexes.push(name);
    }

    Ok(InitReport {
        user: APP_USER.username.to_string(),
        indexes,
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::sync::Mutex;

    /// Records issued requests and optionally fails at a chosen step.
    struct ScriptedInitializer {
        calls: Mutex<Vec<String>>,
        fail_user: bool,
        fail_index_at: Option<usize>,
    }

    impl ScriptedInitializer {
        // ---
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_user: false,
                fail_index_at: None,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Initializer for ScriptedInitializer {
        // ---
        async fn create_application_user(
            &self,
            spec: &AppUserSpec,
        ) -> Result<(), CredentialCreationError> {
            self.calls.lock().unwrap().push(format!("user:{}", spec.username));
            if self.fail_user {
                return Err(CredentialCreationError {
                    username: spec.username.to_string(),
                    source: "user already exists".into(),
                });
            }
            Ok(())
        }

        async fn create_index(&self, spec: &IndexSpec) -> Result<String, IndexCreationError> {
            let mut calls = self.calls.lock().unwrap();
            let issued_before = calls.iter().filter(|c| c.starts_with("index:")).count();
            calls.push(format!("index:{}", spec.describe()));
            if self.fail_index_at == Some(issued_before) {
                return Err(IndexCreationError {
                    index: spec.describe(),
                    source: "IndexOptionsConflict".into(),
                });
            }
            Ok(format!("idx_{issued_before}"))
        }
    }

    #[tokio::test]
    async fn issues_user_creation_before_any_index() {
        // ---
        let init = ScriptedInitializer::ok();
        let report = run_initialization(&init).await.expect("run should succeed");

        let calls = init.calls();
        assert_eq!(calls.len(), 8);
        assert_eq!(calls[0], "user:wallet_user");
        assert!(calls[1..].iter().all(|c| c.starts_with("index:")));
        assert_eq!(report.user, "wallet_user");
        assert_eq!(report.indexes.len(), 7);
    }

    #[tokio::test]
    async fn issues_indexes_in_plan_order() {
        // ---
        let init = ScriptedInitializer::ok();
        run_initialization(&init).await.expect("run should succeed");

        let expected: Vec<String> = INDEX_PLAN
            .iter()
            .map(|s| format!("index:{}", s.describe()))
            .collect();
        assert_eq!(init.calls()[1..].to_vec(), expected);
    }

    #[tokio::test]
    async fn user_failure_aborts_before_indexes() {
        // ---
        let init = ScriptedInitializer {
            fail_user: true,
            ..ScriptedInitializer::ok()
        };
        let err = run_initialization(&init).await.expect_err("run should fail");

        assert!(matches!(err, InitError::Credential(_)));
        assert_eq!(init.calls(), vec!["user:wallet_user".to_string()]);
    }

    #[tokio::test]
    async fn index_failure_aborts_remaining_declarations() {
        // ---
        let init = ScriptedInitializer {
            fail_index_at: Some(2),
            ..ScriptedInitializer::ok()
        };
        let err = run_initialization(&init).await.expect_err("run should fail");

        assert!(matches!(err, InitError::Index(_)));
        // user + three index attempts, the third of which failed
        assert_eq!(init.calls().len(), 4);
    }

    #[tokio::test]
    async fn report_notice_is_the_single_success_line() {
        // ---
        let init = ScriptedInitializer::ok();
        let report = run_initialization(&init).await.unwrap();
        assert_eq!(report.notice(), "MongoDB initialization completed successfully!");
    }
}
