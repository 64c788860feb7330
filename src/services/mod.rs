//! Business logic services

pub mod billing;
pub mod export;
pub mod extra_orders;
pub mod meals;
pub mod students;

use std::sync::Arc;

use crate::{config::BillingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub students: students::StudentsService,
    pub meals: meals::MealsService,
    pub extra_orders: extra_orders::ExtraOrdersService,
    pub billing: billing::BillingService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, billing_config: &BillingConfig) -> Self {
        let billing = billing::BillingService::new(
            Arc::new(repository.students.clone()),
            Arc::new(repository.meals.clone()),
            Arc::new(repository.extra_orders.clone()),
            Arc::new(repository.bills.clone()),
            billing_config.history_limit,
        );

        Self {
            students: students::StudentsService::new(repository.clone()),
            meals: meals::MealsService::new(repository.clone()),
            extra_orders: extra_orders::ExtraOrdersService::new(repository.clone()),
            billing,
            repository,
        }
    }
}
