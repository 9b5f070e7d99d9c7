//! Report service: financial summaries, occupancy and role dashboards.

use crate::error::OperationResult;
use crate::validation;
use chrono::NaiveDate;
use hotel_config::OperationsConfig;
use hotel_database::entities::{
    AdminDashboard, FinancialSummary, ManagerDashboard, OccupancyReport, ReceptionistDashboard,
};
use hotel_database::ReportRepository;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ReportService {
    repository: ReportRepository,
    config: OperationsConfig,
}

impl ReportService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: ReportRepository::new(pool),
            config,
        }
    }

    pub async fn financial_summary(
        &self,
        hotel_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> OperationResult<FinancialSummary> {
        validation::date_range(from, to)?;
        Ok(self.repository.financial_summary(hotel_id, from, to).await?)
    }

    pub async fn occupancy(&self, hotel_id: i64, date: Option<NaiveDate>) -> OperationResult<OccupancyReport> {
        let date = date.unwrap_or_else(crate::today);
        Ok(self.repository.occupancy(hotel_id, date).await?)
    }

    pub async fn receptionist_dashboard(
        &self,
        hotel_id: i64,
        date: Option<NaiveDate>,
    ) -> OperationResult<ReceptionistDashboard> {
        let date = date.unwrap_or_else(crate::today);
        Ok(self.repository.receptionist_dashboard(hotel_id, date).await?)
    }

    pub async fn manager_dashboard(
        &self,
        hotel_id: i64,
        date: Option<NaiveDate>,
    ) -> OperationResult<ManagerDashboard> {
        let date = date.unwrap_or_else(crate::today);
        Ok(self
            .repository
            .manager_dashboard(hotel_id, date, self.config.low_stock_threshold_override)
            .await?)
    }

    pub async fn admin_dashboard(&self) -> OperationResult<AdminDashboard> {
        Ok(self.repository.admin_dashboard().await?)
    }
}
