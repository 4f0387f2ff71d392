use serde::{Deserialize, Serialize};

/// Служебные поля строки: даты, пометка удаления, версия
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Дата последнего обновления
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Мягкое удаление (soft delete)
    pub is_deleted: bool,
    /// Документ завершен (статус Completado)
    pub is_posted: bool,
    /// Версия для optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            is_posted: false,
            version: 0,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    /// Увеличить версию
    pub fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metadata_is_live_and_unversioned() {
        let m = EntityMetadata::default();
        assert!(!m.is_deleted);
        assert_eq!(m.version, 0);
        assert_eq!(m.created_at, m.updated_at);
    }

    #[test]
    fn test_touch_moves_only_updated_at() {
        let mut m = EntityMetadata::new();
        let created = m.created_at;
        m.touch();
        m.increment_version();
        assert_eq!(m.created_at, created);
        assert!(m.updated_at >= created);
        assert_eq!(m.version, 1);
    }
}
