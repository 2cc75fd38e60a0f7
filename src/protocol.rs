use serde::Serialize;

use crate::{schedule::ScheduleError, session::AccessError};

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
    pub err_kind: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }
}

/// Classifies a failure so clients can react per kind, e.g. offer another
/// slot on `chair_conflict` instead of showing a generic failure.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(err) = err.downcast_ref::<ScheduleError>() {
        return err.kind();
    }
    if let Some(err) = err.downcast_ref::<AccessError>() {
        return err.kind();
    }
    "other"
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err(err: anyhow::Error) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        err_kind: $crate::protocol::error_kind(&err).to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn conflicts_keep_their_kind_through_context() {
        let err: anyhow::Result<()> = Err(ScheduleError::ChairConflict {
            chair_id: 2,
            appointment_id: "abc".to_string(),
        })
        .context("booking rejected");
        let err = err.unwrap_err();
        assert_eq!(error_kind(&err), "chair_conflict");

        let resp = SimpleResponse::err(err);
        assert!(!resp.success);
        assert_eq!(resp.err, "booking rejected");
        assert_eq!(resp.err_kind, "chair_conflict");
    }

    #[test]
    fn other_failures_are_generic() {
        let err = anyhow::anyhow!("DB error");
        assert_eq!(error_kind(&err), "other");
        assert_eq!(
            error_kind(&anyhow::Error::new(AccessError::Forbidden("cancel"))),
            "forbidden"
        );
        assert!(SimpleResponse::ok().err_kind.is_empty());
    }
}
