//! Payload fixtures and a builder for event payloads.

use ticket_ledger_core::EventPayload;

/// Principal that owns fixture events.
pub const OWNER_ID: &str = "11111111-1111-1111-1111-111111111111";

/// Principal that buys tickets in fixtures.
pub const BUYER_ID: &str = "22222222-2222-2222-2222-222222222222";

/// Principal with no rights over fixture events.
pub const STRANGER_ID: &str = "33333333-3333-3333-3333-333333333333";

/// An active event with three tickets, owned by [`OWNER_ID`], ending at the epoch.
#[must_use]
pub fn gig_payload() -> EventPayload {
    PayloadBuilder::new().build()
}

/// Builder for [`EventPayload`] starting from [`gig_payload`]'s values.
///
/// # Example
///
/// ```
/// use ticket_ledger_testing::PayloadBuilder;
///
/// let payload = PayloadBuilder::new().max_nfts(10).event_name("Festival").build();
/// assert_eq!(payload.max_nfts, "10");
/// assert_eq!(payload.event_name, "Festival");
/// ```
#[derive(Clone, Debug)]
pub struct PayloadBuilder {
    payload: EventPayload,
}

impl PayloadBuilder {
    /// Start from the gig fixture
    #[must_use]
    pub fn new() -> Self {
        Self {
            payload: EventPayload {
                event_name: "Gig".to_string(),
                asset_description: "desc".to_string(),
                owner_id: OWNER_ID.to_string(),
                status: "active".to_string(),
                end_date: "0".to_string(),
                start_date: "0".to_string(),
                event_time: String::new(),
                max_nfts: "3".to_string(),
                image: "img".to_string(),
            },
        }
    }

    /// Start from an all-empty payload, as an update that changes nothing but the owner would send
    #[must_use]
    pub fn empty() -> Self {
        Self {
            payload: EventPayload::default(),
        }
    }

    /// Set the display name
    #[must_use]
    pub fn event_name(mut self, name: impl Into<String>) -> Self {
        self.payload.event_name = name.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn asset_description(mut self, description: impl Into<String>) -> Self {
        self.payload.asset_description = description.into();
        self
    }

    /// Set the owner principal
    #[must_use]
    pub fn owner_id(mut self, owner: impl Into<String>) -> Self {
        self.payload.owner_id = owner.into();
        self
    }

    /// Set the raw status string
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.payload.status = status.into();
        self
    }

    /// Set the ticket pool size
    #[must_use]
    pub fn max_nfts(mut self, count: u64) -> Self {
        self.payload.max_nfts = count.to_string();
        self
    }

    /// Set the raw `maxNFTs` string, including malformed values
    #[must_use]
    pub fn raw_max_nfts(mut self, raw: impl Into<String>) -> Self {
        self.payload.max_nfts = raw.into();
        self
    }

    /// Set the start timestamp (epoch nanoseconds)
    #[must_use]
    pub fn start_date(mut self, nanos: u64) -> Self {
        self.payload.start_date = nanos.to_string();
        self
    }

    /// Set the end timestamp (epoch nanoseconds)
    #[must_use]
    pub fn end_date(mut self, nanos: u64) -> Self {
        self.payload.end_date = nanos.to_string();
        self
    }

    /// Set the free-form time description
    #[must_use]
    pub fn event_time(mut self, time: impl Into<String>) -> Self {
        self.payload.event_time = time.into();
        self
    }

    /// Set the cover art URI
    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.payload.image = image.into();
        self
    }

    /// Finish
    #[must_use]
    pub fn build(self) -> EventPayload {
        self.payload
    }
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}
