//! Staff account database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{decode, Database, DbError, DbResult};
use crate::models::{Role, StaffTask, User};
use crate::store::UserStore;

const USER_COLUMNS: &str = "user_id, email, name, contact, role, created_at, \
     task_type, task_diet_id, task_assigned_at";

impl UserStore for Database {
    fn insert_user(&self, user: &User) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO users (user_id, email, name, contact, role, created_at,
                               task_type, task_diet_id, task_assigned_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                user.user_id,
                user.email,
                user.name,
                user.contact,
                user.role.as_str(),
                user.created_at,
                user.current_task.as_ref().map(|t| &t.task_type),
                user.current_task.as_ref().map(|t| &t.diet_id),
                user.current_task.as_ref().map(|t| &t.assigned_at),
            ],
        )?;
        Ok(())
    }

    fn set_current_task(&self, user_id: &str, task: &StaffTask) -> DbResult<bool> {
        let rows = self.conn.execute(
            r#"
            UPDATE users
            SET task_type = ?1, task_diet_id = ?2, task_assigned_at = ?3
            WHERE user_id = ?4
            "#,
            params![task.task_type, task.diet_id, task.assigned_at, user_id],
        )?;
        Ok(rows > 0)
    }

    fn get_user(&self, user_id: &str) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE user_id = ?", USER_COLUMNS),
                [user_id],
                UserRow::read,
            )
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    fn get_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
                [email],
                UserRow::read,
            )
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    fn list_users_by_role(&self, role: Role) -> DbResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM users WHERE role = ? ORDER BY name",
            USER_COLUMNS
        ))?;

        let rows = stmt.query_map([role.as_str()], UserRow::read)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?.try_into()?);
        }
        Ok(users)
    }
}

/// Intermediate row struct for database mapping.
struct UserRow {
    user_id: String,
    email: String,
    name: String,
    contact: String,
    role: String,
    created_at: String,
    task_type: Option<String>,
    task_diet_id: Option<String>,
    task_assigned_at: Option<String>,
}

impl UserRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            contact: row.get(3)?,
            role: row.get(4)?,
            created_at: row.get(5)?,
            task_type: row.get(6)?,
            task_diet_id: row.get(7)?,
            task_assigned_at: row.get(8)?,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let current_task = match (row.task_type, row.task_diet_id, row.task_assigned_at) {
            (Some(task_type), Some(diet_id), Some(assigned_at)) => Some(StaffTask {
                task_type,
                diet_id,
                assigned_at,
            }),
            _ => None,
        };

        Ok(User {
            role: decode(&row.role, "role", Role::parse)?,
            user_id: row.user_id,
            email: row.email,
            name: row.name,
            contact: row.contact,
            created_at: row.created_at,
            current_task,
        })
    }
}
