use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{CertificateFilter, UserChanges, UserRecord};
use async_trait::async_trait;
use certificate_engine::{Certificate, CertificateId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Storage for validated certificate records, scoped by owning user
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Store a record for an existing user
    async fn create(&self, user_id: u64, record: Certificate) -> DatabaseResult<CertificateId>;

    async fn read(&self, user_id: u64, cert_id: &str) -> DatabaseResult<Certificate>;

    /// Toggle the active flag without revalidating
    async fn update_active(
        &self,
        user_id: u64,
        cert_id: &str,
        active: bool,
    ) -> DatabaseResult<Certificate>;

    async fn delete(&self, user_id: u64, cert_id: &str) -> DatabaseResult<()>;

    /// A user's certificates in insertion order
    async fn list_for_user(
        &self,
        user_id: u64,
        filter: CertificateFilter,
    ) -> DatabaseResult<Vec<Certificate>>;
}

/// Storage for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user together with its certificates (atomic)
    async fn create_user(
        &self,
        name: String,
        email: String,
        certs: Vec<Certificate>,
    ) -> DatabaseResult<u64>;

    async fn read_user(&self, id: u64) -> DatabaseResult<UserRecord>;

    async fn update_user(&self, id: u64, changes: UserChanges) -> DatabaseResult<UserRecord>;

    /// Delete a user and every certificate it owns
    async fn delete_user(&self, id: u64) -> DatabaseResult<()>;

    async fn user_exists(&self, id: u64) -> DatabaseResult<bool>;
}

struct UserEntry {
    name: String,
    email: String,
    certs: Vec<Certificate>,
}

impl UserEntry {
    fn record(&self, id: u64) -> UserRecord {
        UserRecord {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            certificate_ids: self.certs.iter().map(|cert| cert.id().clone()).collect(),
        }
    }

    fn position(&self, cert_id: &str) -> Option<usize> {
        self.certs.iter().position(|cert| cert.id().as_str() == cert_id)
    }
}

#[derive(Default)]
struct StoreState {
    last_user_id: u64,
    users: BTreeMap<u64, UserEntry>,
}

impl StoreState {
    fn user(&self, id: u64) -> DatabaseResult<&UserEntry> {
        self.users.get(&id).ok_or_else(|| DatabaseError::user_not_found(id))
    }

    fn user_mut(&mut self, id: u64) -> DatabaseResult<&mut UserEntry> {
        self.users.get_mut(&id).ok_or_else(|| DatabaseError::user_not_found(id))
    }
}

/// In-memory store implementing both repositories.
///
/// A single lock guards users and certificates together, so multi-record
/// writes are never observed half-applied.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(
        &self,
        name: String,
        email: String,
        mut certs: Vec<Certificate>,
    ) -> DatabaseResult<u64> {
        for (index, cert) in certs.iter().enumerate() {
            let duplicate = certs
                .iter()
                .take(index)
                .any(|earlier| earlier.id() == cert.id());
            if duplicate {
                return Err(DatabaseError::Conflict(format!(
                    "certificate {} appears more than once",
                    cert.id()
                )));
            }
        }

        let mut state = self.state.write();
        let id = state
            .last_user_id
            .checked_add(1)
            .ok_or_else(|| DatabaseError::InternalError(anyhow::anyhow!("user id space exhausted")))?;

        for cert in &mut certs {
            cert.set_user_id(id.to_string());
        }

        let count = certs.len();
        state.users.insert(id, UserEntry { name, email, certs });
        state.last_user_id = id;

        info!(user_id = id, certs = count, "Created user");
        Ok(id)
    }

    async fn read_user(&self, id: u64) -> DatabaseResult<UserRecord> {
        let state = self.state.read();
        Ok(state.user(id)?.record(id))
    }

    async fn update_user(&self, id: u64, changes: UserChanges) -> DatabaseResult<UserRecord> {
        let mut state = self.state.write();
        let entry = state.user_mut(id)?;

        if let Some(name) = changes.name {
            entry.name = name;
        }
        if let Some(email) = changes.email {
            entry.email = email;
        }

        debug!(user_id = id, "Updated user");
        Ok(entry.record(id))
    }

    async fn delete_user(&self, id: u64) -> DatabaseResult<()> {
        let removed = self
            .state
            .write()
            .users
            .remove(&id)
            .ok_or_else(|| DatabaseError::user_not_found(id))?;

        info!(user_id = id, certs = removed.certs.len(), "Deleted user and certificates");
        Ok(())
    }

    async fn user_exists(&self, id: u64) -> DatabaseResult<bool> {
        Ok(self.state.read().users.contains_key(&id))
    }
}

#[async_trait]
impl CertificateRepository for InMemoryStore {
    async fn create(&self, user_id: u64, mut record: Certificate) -> DatabaseResult<CertificateId> {
        let mut state = self.state.write();
        let entry = state.user_mut(user_id)?;

        if entry.position(record.id().as_str()).is_some() {
            return Err(DatabaseError::Conflict(format!(
                "certificate {} already exists for user {}",
                record.id(),
                user_id
            )));
        }

        record.set_user_id(user_id.to_string());
        let id = record.id().clone();
        entry.certs.push(record);

        debug!(user_id, cert_id = %id, "Stored certificate");
        Ok(id)
    }

    async fn read(&self, user_id: u64, cert_id: &str) -> DatabaseResult<Certificate> {
        let state = self.state.read();
        let entry = state.user(user_id)?;
        entry
            .certs
            .iter()
            .find(|cert| cert.id().as_str() == cert_id)
            .cloned()
            .ok_or_else(|| DatabaseError::certificate_not_found(cert_id))
    }

    async fn update_active(
        &self,
        user_id: u64,
        cert_id: &str,
        active: bool,
    ) -> DatabaseResult<Certificate> {
        let mut state = self.state.write();
        let entry = state.user_mut(user_id)?;
        let cert = entry
            .certs
            .iter_mut()
            .find(|cert| cert.id().as_str() == cert_id)
            .ok_or_else(|| DatabaseError::certificate_not_found(cert_id))?;

        cert.set_active(active);
        debug!(user_id, cert_id, active, "Updated certificate active flag");
        Ok(cert.clone())
    }

    async fn delete(&self, user_id: u64, cert_id: &str) -> DatabaseResult<()> {
        let mut state = self.state.write();
        let entry = state.user_mut(user_id)?;
        let index = entry
            .position(cert_id)
            .ok_or_else(|| DatabaseError::certificate_not_found(cert_id))?;

        entry.certs.remove(index);
        debug!(user_id, cert_id, "Deleted certificate");
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: u64,
        filter: CertificateFilter,
    ) -> DatabaseResult<Vec<Certificate>> {
        let state = self.state.read();
        let entry = state.user(user_id)?;
        Ok(entry
            .certs
            .iter()
            .filter(|cert| filter.matches(cert.active()))
            .cloned()
            .collect())
    }
}
