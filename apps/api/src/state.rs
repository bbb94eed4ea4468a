use tenure_application::AccessCheckService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_check_service: AccessCheckService,
}
