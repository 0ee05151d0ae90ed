//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `employees` and their `employee_cages` assignment rows.
//!
//! # Invariants
//! - An employee row and its cage set are written in one immediate
//!   transaction; a reader never sees a half-replaced cage set.
//! - `cages` is replaced, never merged, on update.
//! - Passport numbers are unique across employees.

use super::error::{parse_uuid, EntityKind, RepoError, RepoResult};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::validation::ValidationError;
use crate::model::CageId;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::collections::{BTreeSet, HashMap};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    uuid,
    full_name,
    passport_data,
    salary
FROM employees";

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn begin(&self) -> RepoResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        let tx = self.begin()?;
        if passport_taken(&tx, &employee.passport_data, employee.id)? {
            return Err(ValidationError::DuplicatePassport.into());
        }

        tx.execute(
            "INSERT INTO employees (
                uuid,
                full_name,
                passport_data,
                salary
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                employee.id.to_string(),
                employee.full_name.as_str(),
                employee.passport_data.as_str(),
                employee.salary,
            ],
        )?;
        insert_cages(&tx, employee.id, &employee.cages)?;
        tx.commit()?;

        Ok(employee.id)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        employee.validate()?;

        let tx = self.begin()?;
        if passport_taken(&tx, &employee.passport_data, employee.id)? {
            return Err(ValidationError::DuplicatePassport.into());
        }

        let id_text = employee.id.to_string();
        let changed = tx.execute(
            "UPDATE employees
             SET
                full_name = ?1,
                passport_data = ?2,
                salary = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4;",
            params![
                employee.full_name.as_str(),
                employee.passport_data.as_str(),
                employee.salary,
                id_text.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Employee,
                id: employee.id,
            });
        }

        tx.execute(
            "DELETE FROM employee_cages WHERE employee_uuid = ?1;",
            [id_text.as_str()],
        )?;
        insert_cages(&tx, employee.id, &employee.cages)?;
        tx.commit()?;

        Ok(())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let id_text = id.to_string();
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id_text.as_str()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut employee = parse_employee_row(row)?;
        let mut cage_stmt = self.conn.prepare(
            "SELECT cage_id FROM employee_cages WHERE employee_uuid = ?1 ORDER BY cage_id ASC;",
        )?;
        let mut cage_rows = cage_stmt.query([id_text.as_str()])?;
        while let Some(cage_row) = cage_rows.next()? {
            employee.cages.insert(cage_row.get("cage_id")?);
        }

        employee.validate().map_err(|err| {
            RepoError::InvalidData(format!("employee `{id_text}` violates invariants: {err}"))
        })?;
        Ok(Some(employee))
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut cages_by_employee = load_all_cages(self.conn)?;

        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            let mut employee = parse_employee_row(row)?;
            if let Some(cages) = cages_by_employee.remove(&employee.id) {
                employee.cages = cages;
            }
            employee.validate().map_err(|err| {
                RepoError::InvalidData(format!(
                    "employee `{}` violates invariants: {err}",
                    employee.id
                ))
            })?;
            employees.push(employee);
        }

        Ok(employees)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        // Cage rows go with the employee via ON DELETE CASCADE.
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Employee,
                id,
            });
        }

        Ok(())
    }
}

fn passport_taken(tx: &Transaction<'_>, passport_data: &str, own_id: EmployeeId) -> RepoResult<bool> {
    let taken: i64 = tx.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM employees
            WHERE passport_data = ?1 AND uuid != ?2
        );",
        params![passport_data, own_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(taken == 1)
}

fn insert_cages(
    tx: &Transaction<'_>,
    employee_id: EmployeeId,
    cages: &BTreeSet<CageId>,
) -> RepoResult<()> {
    let id_text = employee_id.to_string();
    let mut stmt =
        tx.prepare("INSERT INTO employee_cages (employee_uuid, cage_id) VALUES (?1, ?2);")?;
    for cage_id in cages {
        stmt.execute(params![id_text.as_str(), cage_id])?;
    }
    Ok(())
}

fn load_all_cages(conn: &Connection) -> RepoResult<HashMap<EmployeeId, BTreeSet<CageId>>> {
    let mut stmt = conn.prepare("SELECT employee_uuid, cage_id FROM employee_cages;")?;
    let mut rows = stmt.query([])?;
    let mut cages: HashMap<EmployeeId, BTreeSet<CageId>> = HashMap::new();

    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("employee_uuid")?;
        let employee_id = parse_uuid(&uuid_text, "employee_cages.employee_uuid")?;
        cages
            .entry(employee_id)
            .or_default()
            .insert(row.get("cage_id")?);
    }

    Ok(cages)
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Employee {
        id: parse_uuid(&uuid_text, "employees.uuid")?,
        full_name: row.get("full_name")?,
        passport_data: row.get("passport_data")?,
        salary: row.get("salary")?,
        cages: BTreeSet::new(),
    })
}
