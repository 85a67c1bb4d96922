//! GraphQL subscriptions for patient and doctor changes.
//!
//! ## Architecture
//!
//! Subscriptions use a per-subscriber queue registry:
//! 1. The [`ChangeNotifier`] is registered on the store as a commit hook
//! 2. Each subscription registers its own unbounded queue for one event kind
//! 3. Every patient/doctor commit is rendered to a message and pushed to
//!    all queues of the matching kind
//! 4. Dropping a subscription stream unregisters its queue
//!
//! ## Events
//!
//! - `newPatient` - `New patient added: {name}`
//! - `deletedPatient` - `Patient removed: {name}`
//! - `newDoctor` - `New doctor added: {name}`
//! - `deletedDoctor` - `Doctor removed: {name}`

mod events;
pub mod fields;
mod notifier;

pub use events::{EventKind, NotificationEvent};
pub use fields::{build_subscription_type, subscription_stream};
pub use notifier::{ChangeNotifier, SubscriptionQueue};
