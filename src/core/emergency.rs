//! Emergency-transport request aggregate
//!
//! Builds and tracks one emergency request per incident. Submission is
//! gated client-side: the patient must be actionable (address included),
//! symptoms must be non-empty, and the pickup address must have been
//! explicitly confirmed by the user. After submission the request is
//! immutable except for status and ETA updates pushed by the server.

use crate::api::session::SharedSession;
use crate::api::traits::HealthApi;
use crate::core::pricing;
use crate::core::selector;
use crate::domain::emergency::{
    EmergencyRequest, EmergencyRequestDraft, EmergencyService, BASE_DISPATCH_COST,
};
use crate::domain::errors::CarelineError;
use crate::domain::ids::RequestId;
use crate::domain::patient::Patient;
use crate::domain::result::Result;
use std::sync::Arc;

/// Name reported when the explicit address-confirmation gate is not passed
const ADDRESS_CONFIRMATION_FIELD: &str = "address_confirmation";

/// Aggregate over one emergency-transport request
pub struct EmergencyRequestAggregate {
    api: Arc<dyn HealthApi>,
    session: SharedSession,
    id: Option<RequestId>,
    request: Option<EmergencyRequest>,
}

impl EmergencyRequestAggregate {
    /// Creates an aggregate with no request yet; call
    /// [`submit`](Self::submit) to create one.
    pub fn new(api: Arc<dyn HealthApi>, session: SharedSession) -> Self {
        Self {
            api,
            session,
            id: None,
            request: None,
        }
    }

    /// Creates an aggregate for an existing request, as when opening a
    /// detail view from a history list
    pub fn for_request(api: Arc<dyn HealthApi>, session: SharedSession, id: RequestId) -> Self {
        Self {
            api,
            session,
            id: Some(id),
            request: None,
        }
    }

    /// The current snapshot, if any
    pub fn request(&self) -> Option<&EmergencyRequest> {
        self.request.as_ref()
    }

    /// True once the request can no longer change
    pub fn is_terminal(&self) -> bool {
        self.request
            .as_ref()
            .is_some_and(|r| r.status.is_terminal())
    }

    /// Submits a new emergency request
    ///
    /// `address_confirmed` is a separate boolean gate: the user must have
    /// affirmatively confirmed the pickup address, a non-empty string is
    /// not enough. Pricing is computed client-side from the fixed dispatch
    /// cost plus the selected add-on services.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming every missing field or unmet gate, or
    /// `NotAuthenticated` when the session holds no token. The backend is
    /// not called in either case.
    pub async fn submit(
        &mut self,
        patient: &Patient,
        address: &str,
        symptoms: &str,
        selected_services: Vec<EmergencyService>,
        address_confirmed: bool,
    ) -> Result<EmergencyRequest> {
        let mut missing = selector::validate_for_submission(patient, true)
            .missing_fields()
            .to_vec();
        if address.trim().is_empty() && !missing.iter().any(|f| f == "address") {
            missing.push("address".to_string());
        }
        if symptoms.trim().is_empty() {
            missing.push("symptoms".to_string());
        }
        if !address_confirmed {
            missing.push(ADDRESS_CONFIRMATION_FIELD.to_string());
        }
        if !missing.is_empty() {
            return Err(CarelineError::Validation { missing });
        }

        if self.session.token().is_none() {
            return Err(CarelineError::NotAuthenticated);
        }

        let draft = EmergencyRequestDraft {
            patient: patient.clone(),
            address: address.to_string(),
            symptoms: symptoms.to_string(),
            pricing: pricing::emergency_pricing(BASE_DISPATCH_COST, &selected_services),
            selected_services,
        };

        let request = self.api.create_emergency_request(&draft).await?;
        tracing::info!(
            request_id = %request.id,
            total_cost = request.pricing.total_cost,
            "Emergency request submitted"
        );

        self.id = Some(request.id.clone());
        self.request = Some(request.clone());
        Ok(request)
    }

    /// Re-fetches the request from the server
    ///
    /// Same silent/non-silent contract as the order aggregate: silent
    /// failures are logged and swallowed, the previous snapshot stays.
    ///
    /// # Errors
    ///
    /// Only when `silent` is false.
    pub async fn refresh(&mut self, silent: bool) -> Result<()> {
        let Some(id) = self.id.clone() else {
            if silent {
                return Ok(());
            }
            return Err(CarelineError::NotFound(
                "no emergency request to refresh".to_string(),
            ));
        };

        match self.api.fetch_emergency_request(&id).await {
            Ok(request) => {
                self.request = Some(request);
                Ok(())
            }
            Err(e) if silent => {
                tracing::warn!(request_id = %id, error = %e, "Silent emergency refresh failed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Cancels the request
    ///
    /// The client stops offering cancellation once a vehicle has been
    /// dispatched, even though the server would still accept it then.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the status no longer permits the
    /// client-side cancel action; the snapshot is left unchanged.
    pub async fn cancel(&mut self) -> Result<()> {
        if self.request.is_none() {
            self.refresh(false).await?;
        }
        let (id, status) = match self.request.as_ref() {
            Some(r) => (r.id.clone(), r.status),
            None => {
                return Err(CarelineError::NotFound(
                    "no emergency request to cancel".to_string(),
                ))
            }
        };

        if !status.can_cancel() {
            return Err(CarelineError::invalid_state("cancel emergency request", status));
        }

        let request = self.api.cancel_emergency_request(&id).await?;
        tracing::info!(request_id = %id, "Emergency request cancelled");
        self.request = Some(request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::StaticSession;
    use crate::core::testutil::MockApi;
    use crate::domain::emergency::EmergencyStatus;
    use crate::domain::ids::ServiceId;
    use crate::domain::patient::{Subject, SELF_RELATIONSHIP};

    fn patient() -> Patient {
        Patient {
            subject: Subject::AccountHolder,
            name: "Nguyen Van A".to_string(),
            age: Some(40),
            phone: "0901234567".to_string(),
            address: "12 Ly Thuong Kiet, Ha Noi".to_string(),
            relationship: SELF_RELATIONSHIP.to_string(),
            national_id: None,
            health_insurance_id: None,
        }
    }

    fn service(id: &str, price: i64) -> EmergencyService {
        EmergencyService {
            id: ServiceId::new(id).unwrap(),
            name: id.to_string(),
            description: String::new(),
            price,
        }
    }

    fn aggregate(api: Arc<MockApi>, session: StaticSession) -> EmergencyRequestAggregate {
        EmergencyRequestAggregate::new(api, Arc::new(session))
    }

    #[tokio::test]
    async fn test_submit_computes_pricing() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));

        let request = agg
            .submit(
                &patient(),
                "12 Ly Thuong Kiet, Ha Noi",
                "chest pain, shortness of breath",
                vec![service("oxygen", 200_000), service("nurse", 500_000)],
                true,
            )
            .await
            .unwrap();

        assert_eq!(request.pricing.base_cost, 200_000);
        assert_eq!(request.pricing.services_cost, 700_000);
        assert_eq!(request.pricing.total_cost, 900_000);
        assert_eq!(request.status, EmergencyStatus::Pending);
        assert!(api.called("create_emergency_request"));
    }

    #[tokio::test]
    async fn test_submit_empty_symptoms_rejected() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));

        let result = agg
            .submit(&patient(), "12 Ly Thuong Kiet", "  ", vec![], true)
            .await;

        match result {
            Err(CarelineError::Validation { missing }) => {
                assert_eq!(missing, vec!["symptoms"]);
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert!(!api.called("create_emergency_request"));
    }

    #[tokio::test]
    async fn test_submit_requires_explicit_address_confirmation() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));

        // address is non-empty; the boolean gate must still be passed
        let result = agg
            .submit(&patient(), "12 Ly Thuong Kiet", "fever", vec![], false)
            .await;

        match result {
            Err(CarelineError::Validation { missing }) => {
                assert_eq!(missing, vec!["address_confirmation"]);
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert!(!api.called("create_emergency_request"));
    }

    #[tokio::test]
    async fn test_submit_incomplete_patient_names_all_fields() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));
        let mut incomplete = patient();
        incomplete.phone.clear();
        incomplete.address.clear();

        let result = agg
            .submit(&incomplete, "", "", vec![], false)
            .await;

        match result {
            Err(CarelineError::Validation { missing }) => {
                assert_eq!(
                    missing,
                    vec!["phone", "address", "symptoms", "address_confirmation"]
                );
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_without_session_rejected() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::anonymous());

        let result = agg
            .submit(&patient(), "12 Ly Thuong Kiet", "fever", vec![], true)
            .await;

        assert!(matches!(result, Err(CarelineError::NotAuthenticated)));
        assert!(!api.called("create_emergency_request"));
    }

    #[tokio::test]
    async fn test_silent_refresh_swallows_failure() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));
        agg.submit(&patient(), "addr", "fever", vec![], true)
            .await
            .unwrap();

        api.fail_fetch.store(true, std::sync::atomic::Ordering::SeqCst);
        agg.refresh(true).await.unwrap();
        assert_eq!(agg.request().unwrap().status, EmergencyStatus::Pending);

        let loud = agg.refresh(false).await;
        assert!(matches!(loud, Err(CarelineError::Transport(_))));
    }

    #[tokio::test]
    async fn test_cancel_gated_once_dispatched() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));
        agg.submit(&patient(), "addr", "fever", vec![], true)
            .await
            .unwrap();

        api.emergency.lock().unwrap().as_mut().unwrap().status = EmergencyStatus::Dispatched;
        agg.refresh(false).await.unwrap();

        let result = agg.cancel().await;
        assert!(matches!(result, Err(CarelineError::InvalidState { .. })));
        assert_eq!(agg.request().unwrap().status, EmergencyStatus::Dispatched);
        assert!(!api.called("cancel_emergency_request"));
    }

    #[tokio::test]
    async fn test_cancel_while_requested_succeeds() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));
        agg.submit(&patient(), "addr", "fever", vec![], true)
            .await
            .unwrap();

        api.emergency.lock().unwrap().as_mut().unwrap().status = EmergencyStatus::Requested;
        agg.refresh(false).await.unwrap();

        agg.cancel().await.unwrap();
        assert_eq!(agg.request().unwrap().status, EmergencyStatus::Cancelled);
        assert!(agg.is_terminal());
    }

    #[tokio::test]
    async fn test_server_status_is_authoritative() {
        let api = Arc::new(MockApi::default());
        let mut agg = aggregate(api.clone(), StaticSession::authenticated("jwt"));
        agg.submit(&patient(), "addr", "fever", vec![], true)
            .await
            .unwrap();

        // server may skip states; the client renders whatever it receives
        api.emergency.lock().unwrap().as_mut().unwrap().status = EmergencyStatus::Arrived;
        agg.refresh(false).await.unwrap();
        assert_eq!(agg.request().unwrap().status, EmergencyStatus::Arrived);
    }
}
