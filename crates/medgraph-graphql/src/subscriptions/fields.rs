//! GraphQL subscription field definitions.

use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{Subscription, SubscriptionField, SubscriptionFieldFuture, TypeRef};
use futures_util::{Stream, StreamExt};
use tracing::debug;

use super::events::EventKind;
use super::notifier::ChangeNotifier;

/// Builds the GraphQL Subscription type with all subscription fields.
///
/// Creates the following subscription fields, each yielding `String!`:
/// - `newPatient` - Patient creations
/// - `deletedPatient` - Patient deletions, including category cascades
/// - `newDoctor` - Doctor creations
/// - `deletedDoctor` - Doctor deletions
pub fn build_subscription_type(notifier: Arc<ChangeNotifier>) -> Subscription {
    EventKind::ALL
        .into_iter()
        .fold(Subscription::new("Subscription"), |subscription, kind| {
            subscription.field(create_notification_field(kind, notifier.clone()))
        })
}

/// Creates the subscription field streaming notifications of one kind.
fn create_notification_field(kind: EventKind, notifier: Arc<ChangeNotifier>) -> SubscriptionField {
    SubscriptionField::new(kind.field_name(), TypeRef::named_nn(TypeRef::STRING), move |_| {
        let notifier = notifier.clone();

        SubscriptionFieldFuture::new(async move {
            debug!(field = kind.field_name(), "Starting subscription");
            Ok(subscription_stream(&notifier, kind))
        })
    })
    .description(description(kind))
}

/// Registers a queue for `kind` and adapts it to a GraphQL value stream.
pub fn subscription_stream(
    notifier: &ChangeNotifier,
    kind: EventKind,
) -> impl Stream<Item = Result<Value, async_graphql::Error>> + Send + use<> {
    notifier
        .subscribe(kind)
        .map(|message| Ok(Value::String(message)))
}

fn description(kind: EventKind) -> &'static str {
    match kind {
        EventKind::PatientAdded => "Receive a message each time a patient is added",
        EventKind::PatientDeleted => "Receive a message each time a patient is removed",
        EventKind::DoctorAdded => "Receive a message each time a doctor is added",
        EventKind::DoctorDeleted => "Receive a message each time a doctor is removed",
    }
}
