//! Error handling for the gRPC server: maps `RcenterError` onto `tonic::Status`
//! so handlers can propagate with `?` the same way the rest of the workspace
//! propagates `anyhow::Result`.

pub use rcenter_common::error::{
    ACCESS_DENIED, API_DEPRECATED, API_FUNCTION_DISABLED, DATA_ACCESS_ERROR, DATA_EMPTY,
    DATA_VALIDATION_FAILED, ErrorCode, HEALTHY_PARAM_MISS, ILLEGAL_NAMESPACE, ILLEGAL_STATE,
    INSTANCE_ERROR, INSTANCE_METADATA_ERROR, INSTANCE_NOT_FOUND, INVALID_DATA_ID,
    MEDIA_TYPE_ERROR, NAMESPACE_ALREADY_EXIST, NAMESPACE_NOT_EXIST, PARAMETER_MISMATCH,
    PARAMETER_MISSING, PARAMETER_VALIDATE_ERROR, RESOURCE_CONFLICT, RESOURCE_NOT_FOUND,
    RcenterError, SELECTOR_ERROR, SERVER_ERROR, SERVICE_ALREADY_EXIST, SERVICE_DELETE_FAILURE,
    SERVICE_METADATA_ERROR, SERVICE_NAME_ERROR, SERVICE_NOT_EXIST, SUCCESS, TENANT_PARAM_ERROR,
    WEIGHT_ERROR,
};

/// Map a domain error onto the gRPC status code a client should act on.
pub fn rcenter_error_to_status(err: &RcenterError) -> tonic::Status {
    match err {
        RcenterError::IllegalArgument(msg) => tonic::Status::invalid_argument(msg.clone()),
        RcenterError::UserNotExist(msg) => tonic::Status::not_found(msg.clone()),
        RcenterError::ApiError(_, _, msg, _) => tonic::Status::unknown(msg.clone()),
        RcenterError::NetworkError(msg) => tonic::Status::unavailable(msg.clone()),
        RcenterError::DatabaseError(msg) => tonic::Status::internal(msg.clone()),
        RcenterError::AuthError(msg) => tonic::Status::unauthenticated(msg.clone()),
        RcenterError::ConfigError(msg) => tonic::Status::invalid_argument(msg.clone()),
        RcenterError::InternalError(msg) => tonic::Status::internal(msg.clone()),
        RcenterError::NamespaceNotExist(msg) => tonic::Status::not_found(msg.clone()),
        RcenterError::NamespaceAlreadyExist(msg) => tonic::Status::already_exists(msg.clone()),
    }
}

/// Best-effort conversion for an opaque `anyhow::Error`: looks for a wrapped
/// `RcenterError` before falling back to a generic internal error.
pub fn anyhow_to_status(err: &anyhow::Error) -> tonic::Status {
    match err.downcast_ref::<RcenterError>() {
        Some(rcenter_err) => rcenter_error_to_status(rcenter_err),
        None => tonic::Status::internal(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_argument_maps_to_invalid_argument() {
        let err = RcenterError::IllegalArgument("bad input".to_string());
        assert_eq!(rcenter_error_to_status(&err).code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn namespace_not_exist_maps_to_not_found() {
        let err = RcenterError::NamespaceNotExist("ns1".to_string());
        assert_eq!(rcenter_error_to_status(&err).code(), tonic::Code::NotFound);
    }

    #[test]
    fn anyhow_wrapping_rcenter_error_unwraps() {
        let wrapped = anyhow::Error::new(RcenterError::AuthError("no token".to_string()));
        assert_eq!(anyhow_to_status(&wrapped).code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn anyhow_plain_error_is_internal() {
        let err = anyhow::anyhow!("disk full");
        assert_eq!(anyhow_to_status(&err).code(), tonic::Code::Internal);
    }

    #[test]
    fn error_code_constants() {
        assert_eq!(SUCCESS.code, 0);
        assert_eq!(PARAMETER_MISSING.code, 10000);
        assert_eq!(ACCESS_DENIED.code, 10001);
    }
}
