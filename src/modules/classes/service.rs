use serde_json::json;
use uuid::Uuid;

use crate::provider::{DataProvider, Filter};
use crate::utils::errors::AppError;

use super::model::{Classe, CreateClasseDto, Eleve};

const CLASSES_TABLE: &str = "classes";
const USERS_TABLE: &str = "users";

pub struct ClasseService;

impl ClasseService {
    pub async fn create_classe(
        provider: &dyn DataProvider,
        dto: CreateClasseDto,
    ) -> Result<Classe, AppError> {
        let rows = provider
            .insert(CLASSES_TABLE, json!({ "nom": dto.nom, "niveau": dto.niveau }))
            .await?;

        let row = rows.into_iter().next().ok_or_else(|| {
            AppError::internal(anyhow::anyhow!("Provider returned no inserted class"))
        })?;

        serde_json::from_value(row)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Malformed class row: {}", e)))
    }

    pub async fn list_classes(provider: &dyn DataProvider) -> Result<Vec<Classe>, AppError> {
        let rows = provider.select(CLASSES_TABLE, "*", &[]).await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| AppError::internal(anyhow::anyhow!("Malformed class row: {}", e)))
            })
            .collect()
    }

    /// Classes owned by one teacher, scoped by `enseignant_id`.
    pub async fn classes_by_enseignant(
        provider: &dyn DataProvider,
        enseignant_id: Uuid,
    ) -> Result<Vec<Classe>, AppError> {
        let rows = provider
            .select(
                CLASSES_TABLE,
                "*",
                &[Filter::eq("enseignant_id", enseignant_id)],
            )
            .await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| AppError::internal(anyhow::anyhow!("Malformed class row: {}", e)))
            })
            .collect()
    }

    /// Roster of a class: users filtered to students of that class.
    pub async fn eleves_of_classe(
        provider: &dyn DataProvider,
        classe_id: Uuid,
    ) -> Result<Vec<Eleve>, AppError> {
        let rows = provider
            .select(
                USERS_TABLE,
                "id,nom,prenom,email",
                &[Filter::eq("classe_id", classe_id), Filter::eq("role", "eleve")],
            )
            .await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| {
                    AppError::internal(anyhow::anyhow!("Malformed student row: {}", e))
                })
            })
            .collect()
    }
}
