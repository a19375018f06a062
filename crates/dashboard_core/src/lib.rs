//! Dashboard state for an independent artist: the upload wizard, the
//! release and revenue tables, and the pages around them.

pub mod auth;
pub mod draft;
pub mod navigation;
pub mod overview;
pub mod profile;
pub mod query;
pub mod releases;
pub mod revenue;
pub mod upload;
pub mod wizard;

pub use auth::{AuthError, AuthProvider, MockAuthProvider, Session, SessionEvent};
pub use draft::{MediaBlob, MediaKind, MonetizationFlags, UploadDraft};
pub use navigation::{Route, Shell, SidebarItem};
pub use overview::DashboardOverview;
pub use profile::{ProfileEditor, ProfileError};
pub use query::{QueryRecord, SortDirection, SortSpec, TableQuery, TableQueryEngine};
pub use releases::{ReleaseBrowser, ReleaseColumn, StatusFilter};
pub use revenue::{format_usd, RevenueBrowser, RevenueColumn, RevenueReport, Timeframe};
pub use upload::{UploadEvent, UploadSimulation, UploadTask};
pub use wizard::{WizardController, WizardError, WizardEvent, WizardState};
