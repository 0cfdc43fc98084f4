use std::sync::Arc;

use sea_orm::DatabaseConnection;

use configs::AppConfig;
use service::booking::{repo::seaorm::SeaOrmBookingRepository, repository::BookingRepository, BookingService};
use service::catalog::{repo::seaorm::SeaOrmWorkshopRepository, repository::WorkshopRepository, WorkshopService};
use service::front::FrontService;
use service::reference::{
    repo::seaorm::SeaOrmReferenceRepository,
    repository::{CategoryRepository, InstructorRepository},
    ReferenceService,
};
use service::storage::{FileStore, LocalFileStore};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub reference: Arc<ReferenceService>,
    pub workshops: Arc<WorkshopService>,
    pub bookings: Arc<BookingService>,
    pub front: Arc<FrontService>,
    pub files: Arc<dyn FileStore>,
    pub max_upload_bytes: usize,
}

/// Repository set the services are built from.
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub instructors: Arc<dyn InstructorRepository>,
    pub workshops: Arc<dyn WorkshopRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        let reference = Arc::new(SeaOrmReferenceRepository::new(db.clone()));
        Self {
            categories: reference.clone(),
            instructors: reference,
            workshops: Arc::new(SeaOrmWorkshopRepository::new(db.clone())),
            bookings: Arc::new(SeaOrmBookingRepository::new(db)),
        }
    }
}

impl ServerState {
    pub fn new(repos: Repositories, cfg: &AppConfig) -> Self {
        let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(
            cfg.storage.upload_dir.clone(),
            cfg.storage.max_upload_bytes,
        ));
        Self {
            reference: Arc::new(ReferenceService::new(repos.categories.clone(), repos.instructors.clone())),
            workshops: Arc::new(WorkshopService::new(
                repos.workshops.clone(),
                repos.categories.clone(),
                repos.instructors.clone(),
            )),
            bookings: Arc::new(BookingService::new(
                repos.bookings.clone(),
                repos.workshops.clone(),
                cfg.booking.trx_prefix.clone(),
            )),
            front: Arc::new(FrontService::new(repos.workshops, repos.categories, cfg.front.new_workshops_limit)),
            files,
            max_upload_bytes: cfg.storage.max_upload_bytes,
        }
    }
}
