pub use super::contest::Entity as Contest;
pub use super::contest_subscription::Entity as ContestSubscription;
pub use super::profile::Entity as Profile;
pub use super::reminder::Entity as Reminder;
pub use super::sync_log::Entity as SyncLog;
