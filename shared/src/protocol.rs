use crate::{
    Event, LoginResponse, OrganizerSummary, RefreshResponse, Ticket, TokenPair, UserProfile,
    UserRole, VendorRequest, VendorService, VendorSummary,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an
/// API endpoint.
///
/// Fixed-path endpoints keep the whole definition in constants; endpoints with
/// a path parameter or query string override `path()`. Multipart endpoints
/// (event/service creation) do not fit a serde body and live as dedicated
/// client methods instead.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, fixed part (joined onto the client base URL).
    const PATH: &'static str;

    /// The effective path for this request instance.
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(Self::PATH)
    }
}

/// Generic `{"message": ...}` acknowledgement body. Unknown fields are
/// ignored, a missing message decodes to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/login/";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub user_type: UserRole,
}

impl ApiRequest for RegisterRequest {
    type Response = TokenPair;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/register/";
}

/// Fetch the current user's profile (requires a bearer token).
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/auth/profile/";
}

/// Exchange a refresh token for a fresh access token.
/// Sent outside the authenticated pipeline (see `api::ApiClient`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

impl ApiRequest for RefreshRequest {
    type Response = RefreshResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/token/refresh/";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/forgot-password/";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(skip)]
    pub uid: String,
    #[serde(skip)]
    pub token: String,
    pub password: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/reset-password/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/reset-password/{}/{}/", self.uid, self.token))
    }
}

/// Connect an organizer's payout bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubaccountRequest {
    pub account_number: String,
    pub bank_code: String,
    pub business_name: String,
}

impl ApiRequest for SubaccountRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/organizer/setup-subaccount/";
}

// =========================================================
// Events & tickets
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListEventsRequest;

impl ApiRequest for ListEventsRequest {
    type Response = Vec<Event>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/list/";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetailRequest {
    pub slug: String,
}

impl ApiRequest for EventDetailRequest {
    type Response = Event;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/detail/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/events/detail/{}/", self.slug))
    }
}

/// Events owned by the logged-in organizer.
#[derive(Debug, Serialize, Deserialize)]
pub struct MyEventsRequest;

impl ApiRequest for MyEventsRequest {
    type Response = Vec<Event>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/my-events/";
}

/// Response of the multipart event-creation endpoint. The follow-up payment
/// step needs the id; its absence is treated as a creation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEventResponse {
    #[serde(default)]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTicketRequest {
    pub event_id: u64,
    pub quantity: u32,
}

impl ApiRequest for BookTicketRequest {
    type Response = PaymentLink;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/events/book-ticket/";
}

/// Initiate listing payment for a freshly created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiatePaymentRequest {
    pub event_id: u64,
}

impl ApiRequest for InitiatePaymentRequest {
    type Response = PaymentLink;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/events/initiate-payment/";
}

/// A gateway redirect URL. Missing when the backend could not start the
/// payment; callers must surface that instead of navigating nowhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentLink {
    #[serde(default)]
    pub payment_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MyTicketsRequest;

impl ApiRequest for MyTicketsRequest {
    type Response = Vec<Ticket>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/my-tickets/";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketByReferenceRequest {
    pub reference: String,
}

impl ApiRequest for TicketByReferenceRequest {
    type Response = Ticket;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/ticket/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/events/ticket/{}/", self.reference))
    }
}

/// Verify the listing payment after the gateway redirects back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub reference: String,
}

impl ApiRequest for VerifyPaymentRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/verify-payment/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/events/verify-payment/?reference={}", self.reference))
    }
}

/// Verify a ticket purchase after the gateway redirects back; returns the
/// issued ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTicketPaymentRequest {
    pub reference: String,
}

impl ApiRequest for VerifyTicketPaymentRequest {
    type Response = Ticket;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/verify-ticket-payment/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!(
            "/events/verify-ticket-payment/?reference={}",
            self.reference
        ))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrganizerSummaryRequest;

impl ApiRequest for OrganizerSummaryRequest {
    type Response = OrganizerSummary;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/events/dashboard/summary/";
}

// =========================================================
// Vendor marketplace
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListServicesRequest;

impl ApiRequest for ListServicesRequest {
    type Response = Vec<VendorService>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/vendors/services/";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDetailRequest {
    pub slug: String,
}

impl ApiRequest for ServiceDetailRequest {
    type Response = VendorService;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/vendors/services/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/vendors/services/{}/", self.slug))
    }
}

/// Organizer → vendor collaboration request. The backend enforces a unique
/// (event, vendor_service) pair; clients pre-check locally before sending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVendorRequest {
    pub event: u64,
    pub vendor_service: u64,
    pub message: String,
}

impl ApiRequest for CreateVendorRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/vendors/request/";
}

/// Requests the logged-in organizer has sent.
#[derive(Debug, Serialize, Deserialize)]
pub struct SentRequestsRequest;

impl ApiRequest for SentRequestsRequest {
    type Response = Vec<VendorRequest>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/vendors/sent-requests/";
}

/// Requests addressed to the logged-in vendor.
#[derive(Debug, Serialize, Deserialize)]
pub struct MyRequestsRequest;

impl ApiRequest for MyRequestsRequest {
    type Response = Vec<VendorRequest>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/vendors/my-requests/";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RespondAction {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondRequest {
    #[serde(skip)]
    pub key: String,
    pub action: RespondAction,
}

impl ApiRequest for RespondRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/vendors/respond-request/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/vendors/respond-request/{}/", self.key))
    }
}

/// Direct date+time booking of a vendor service (non-organizer viewers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookVendorRequest {
    pub service: u64,
    pub date: String,
    pub time: String,
}

impl ApiRequest for BookVendorRequest {
    type Response = ApiMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/vendors/book/";
}

/// Vendor dashboard summary, filtered by a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSummaryRequest {
    pub period: String,
}

impl ApiRequest for VendorSummaryRequest {
    type Response = VendorSummary;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/vendors/dashboard-summary/";

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/vendors/dashboard-summary/?period={}", self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_paths_use_const() {
        assert_eq!(ProfileRequest.path(), "/auth/profile/");
        assert_eq!(ListEventsRequest.path(), "/events/list/");
    }

    #[test]
    fn parameterised_paths_interpolate() {
        let detail = EventDetailRequest {
            slug: "rust-meetup".into(),
        };
        assert_eq!(detail.path(), "/events/detail/rust-meetup/");

        let reset = ResetPasswordRequest {
            uid: "MQ".into(),
            token: "abc-123".into(),
            password: "secret".into(),
        };
        assert_eq!(reset.path(), "/reset-password/MQ/abc-123/");

        let summary = VendorSummaryRequest {
            period: "week".into(),
        };
        assert_eq!(summary.path(), "/vendors/dashboard-summary/?period=week");
    }

    #[test]
    fn path_params_never_serialize_into_body() {
        let reset = ResetPasswordRequest {
            uid: "MQ".into(),
            token: "abc-123".into(),
            password: "secret".into(),
        };
        let body = serde_json::to_value(&reset).unwrap();
        assert_eq!(body, serde_json::json!({ "password": "secret" }));

        let respond = RespondRequest {
            key: "summer-fest".into(),
            action: RespondAction::Accepted,
        };
        let body = serde_json::to_value(&respond).unwrap();
        assert_eq!(body, serde_json::json!({ "action": "accepted" }));
    }
}
