//! Wire-level request and response shapes
//!
//! The backend speaks camelCase JSON and still identifies the account
//! holder with the legacy `"current_user"` id. All of that stays in this
//! module: DTOs convert to and from domain types at the adapter boundary
//! and nothing wire-shaped leaks further in.

use crate::domain::cart::{AppointmentInfo, Cart, CartLineItem, ServiceRef};
use crate::domain::emergency::{
    EmergencyPricing, EmergencyRequest, EmergencyRequestDraft, EmergencyService, EmergencyStatus,
};
use crate::domain::errors::CarelineError;
use crate::domain::ids::{OrderId, RequestId, ServiceId};
use crate::domain::order::{Order, OrderStatus, PaymentMethod};
use crate::domain::patient::{Patient, Subject};
use crate::domain::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn invalid(field: &str, err: impl std::fmt::Display) -> CarelineError {
    CarelineError::Serialization(format!("invalid {field} in response: {err}"))
}

/// Error body shape used by the backend for non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message; the only field the backend guarantees
    pub message: Option<String>,
}

/// Patient as the backend represents it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_insurance_id: Option<String>,
}

impl PatientDto {
    pub fn into_domain(self) -> Result<Patient> {
        let subject = Subject::from_wire_id(&self.id).map_err(|e| invalid("patient id", e))?;
        Ok(Patient {
            subject,
            name: self.name,
            age: self.age,
            phone: self.phone,
            address: self.address,
            relationship: self.relationship,
            national_id: self.national_id,
            health_insurance_id: self.health_insurance_id,
        })
    }
}

impl From<&Patient> for PatientDto {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.subject.wire_id().to_string(),
            name: patient.name.clone(),
            age: patient.age,
            phone: patient.phone.clone(),
            address: patient.address.clone(),
            relationship: patient.relationship.clone(),
            national_id: patient.national_id.clone(),
            health_insurance_id: patient.health_insurance_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRefDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInfoDto {
    pub patient: PatientDto,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub additional_services: Vec<ServiceRefDto>,
    #[serde(default)]
    pub symptoms: String,
    pub created_at: DateTime<Utc>,
}

impl AppointmentInfoDto {
    fn into_domain(self) -> Result<AppointmentInfo> {
        let mut additional_services = Vec::with_capacity(self.additional_services.len());
        for service in self.additional_services {
            additional_services.push(ServiceRef {
                id: ServiceId::new(service.id).map_err(|e| invalid("additional service id", e))?,
                name: service.name,
            });
        }
        Ok(AppointmentInfo {
            patient: self.patient.into_domain()?,
            date: self.date,
            time: self.time,
            additional_services,
            symptoms: self.symptoms,
            created_at: self.created_at,
        })
    }
}

impl From<&AppointmentInfo> for AppointmentInfoDto {
    fn from(info: &AppointmentInfo) -> Self {
        Self {
            patient: PatientDto::from(&info.patient),
            date: info.date.clone(),
            time: info.time.clone(),
            additional_services: info
                .additional_services
                .iter()
                .map(|s| ServiceRefDto {
                    id: s.id.as_str().to_string(),
                    name: s.name.clone(),
                })
                .collect(),
            symptoms: info.symptoms.clone(),
            created_at: info.created_at,
        }
    }
}

/// Cart line item; the backend calls the service id field `service`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub service: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_info: Option<AppointmentInfoDto>,
}

fn one() -> u32 {
    1
}

impl CartItemDto {
    pub fn into_domain(self) -> Result<CartLineItem> {
        Ok(CartLineItem {
            service_id: ServiceId::new(self.service).map_err(|e| invalid("cart service id", e))?,
            name: self.name,
            unit_price: self.price,
            quantity: self.quantity,
            appointment: self.appointment_info.map(|a| a.into_domain()).transpose()?,
        })
    }
}

impl From<&CartLineItem> for CartItemDto {
    fn from(item: &CartLineItem) -> Self {
        Self {
            service: item.service_id.as_str().to_string(),
            name: item.name.clone(),
            price: item.unit_price,
            quantity: item.quantity,
            appointment_info: item.appointment.as_ref().map(AppointmentInfoDto::from),
        }
    }
}

/// Response body of `GET /cart`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    #[serde(default)]
    pub items: Vec<CartItemDto>,
    #[serde(default)]
    #[allow(dead_code)]
    pub total_price: Option<i64>,
}

impl CartDto {
    pub fn into_domain(self) -> Result<Cart> {
        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            items.push(item.into_domain()?);
        }
        Ok(Cart { items })
    }
}

/// Body of `PUT /cart/update`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityBody<'a> {
    pub service: &'a str,
    pub quantity: u32,
}

/// Body of `DELETE /cart/remove`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemBody<'a> {
    pub service: &'a str,
}

/// Body of `POST /orders`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub payment_method: PaymentMethod,
}

/// Order as the backend represents it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    #[serde(default)]
    pub items: Vec<CartItemDto>,
    pub payment_method: PaymentMethod,
    pub total_price: i64,
    #[serde(default)]
    pub tax_price: i64,
    #[serde(default)]
    pub is_paid: bool,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderDto {
    pub fn into_domain(self) -> Result<Order> {
        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            items.push(item.into_domain()?);
        }
        Ok(Order {
            id: OrderId::new(self.id).map_err(|e| invalid("order id", e))?,
            items,
            payment_method: self.payment_method,
            total_price: self.total_price,
            tax_price: self.tax_price,
            is_paid: self.is_paid,
            status: self.status,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyServiceDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: i64,
}

impl EmergencyServiceDto {
    fn into_domain(self) -> Result<EmergencyService> {
        Ok(EmergencyService {
            id: ServiceId::new(self.id).map_err(|e| invalid("emergency service id", e))?,
            name: self.name,
            description: self.description,
            price: self.price,
        })
    }
}

impl From<&EmergencyService> for EmergencyServiceDto {
    fn from(service: &EmergencyService) -> Self {
        Self {
            id: service.id.as_str().to_string(),
            name: service.name.clone(),
            description: service.description.clone(),
            price: service.price,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyPricingDto {
    pub base_cost: i64,
    pub services_cost: i64,
    pub total_cost: i64,
}

impl From<EmergencyPricingDto> for EmergencyPricing {
    fn from(dto: EmergencyPricingDto) -> Self {
        Self {
            base_cost: dto.base_cost,
            services_cost: dto.services_cost,
            total_cost: dto.total_cost,
        }
    }
}

impl From<&EmergencyPricing> for EmergencyPricingDto {
    fn from(pricing: &EmergencyPricing) -> Self {
        Self {
            base_cost: pricing.base_cost,
            services_cost: pricing.services_cost,
            total_cost: pricing.total_cost,
        }
    }
}

/// Body of `POST /emergency`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmergencyBody {
    pub patient: PatientDto,
    pub location: LocationDto,
    pub symptoms: String,
    pub selected_services: Vec<EmergencyServiceDto>,
    pub pricing: EmergencyPricingDto,
}

impl From<&EmergencyRequestDraft> for CreateEmergencyBody {
    fn from(draft: &EmergencyRequestDraft) -> Self {
        Self {
            patient: PatientDto::from(&draft.patient),
            location: LocationDto {
                address: draft.address.clone(),
            },
            symptoms: draft.symptoms.clone(),
            selected_services: draft
                .selected_services
                .iter()
                .map(EmergencyServiceDto::from)
                .collect(),
            pricing: EmergencyPricingDto::from(&draft.pricing),
        }
    }
}

/// Emergency request as the backend represents it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequestDto {
    pub id: String,
    pub patient: PatientDto,
    pub location: LocationDto,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub selected_services: Vec<EmergencyServiceDto>,
    pub pricing: EmergencyPricingDto,
    pub status: EmergencyStatus,
    #[serde(default)]
    pub estimated_arrival_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl EmergencyRequestDto {
    pub fn into_domain(self) -> Result<EmergencyRequest> {
        let mut selected_services = Vec::with_capacity(self.selected_services.len());
        for service in self.selected_services {
            selected_services.push(service.into_domain()?);
        }
        Ok(EmergencyRequest {
            id: RequestId::new(self.id).map_err(|e| invalid("request id", e))?,
            patient: self.patient.into_domain()?,
            address: self.location.address,
            symptoms: self.symptoms,
            selected_services,
            pricing: self.pricing.into(),
            status: self.status,
            estimated_arrival_time: self.estimated_arrival_time,
            created_at: self.created_at,
        })
    }
}
