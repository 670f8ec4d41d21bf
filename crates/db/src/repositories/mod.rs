//! Repository structs with async CRUD and domain-rule methods.
//!
//! Each repository is a zero-sized struct whose methods take `&PgPool`.
//! Operations that must enforce an invariant atomically open their own
//! transaction.

pub mod activity_repo;
pub mod announcement_repo;
pub mod common_area_repo;
pub mod dashboard_repo;
pub mod provider_repo;
pub mod reservation_repo;
pub mod resident_repo;
pub mod session_repo;
pub mod unit_repo;
pub mod user_repo;
pub mod visitor_repo;
pub mod work_order_repo;

pub use activity_repo::ActivityRepo;
pub use announcement_repo::AnnouncementRepo;
pub use common_area_repo::CommonAreaRepo;
pub use dashboard_repo::DashboardRepo;
pub use provider_repo::ProviderRepo;
pub use reservation_repo::ReservationRepo;
pub use resident_repo::ResidentRepo;
pub use session_repo::SessionRepo;
pub use unit_repo::UnitRepo;
pub use user_repo::UserRepo;
pub use visitor_repo::VisitorRepo;
pub use work_order_repo::WorkOrderRepo;
