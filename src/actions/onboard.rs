//! The onboarding orchestrator.
//!
//! Creates an auth identity, a client, a user mirror and, depending on the
//! client type, contact/company records, in a fixed order with each step
//! gated on the previous one. Every committed step pushes an [`UndoStep`]
//! onto a per-request compensation log; if a later step fails, the log is
//! replayed in reverse on a best-effort basis and the caller gets the
//! original failure, never a rollback failure.

use crate::crypto::{Argon2Hasher, PasswordHasher, SecretString};
use crate::identity::{Identity, IdentityProvider};
use crate::records::{
    ClientRepository, ClientType, CompanyRepository, ContactCompanyRepository, ContactRepository,
    NewClient, NewCompany, NewContact, NewUser, UserRepository,
};
use crate::validators::{normalize_document, normalize_phone, validate_email, validate_password};
use crate::IntakeError;

/// Raw onboarding payload, before validation.
///
/// Every field is optional so missing and empty values can both be rejected
/// with this crate's own validation error rather than a deserialization
/// failure.
#[derive(Debug, Clone, Default)]
pub struct OnboardInput {
    pub client_type: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub document: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

/// A validated, normalized onboarding profile.
///
/// Construction is pure: no I/O happens until the profile is handed to
/// [`OnboardAction::execute`]. The type tag is resolved once, here; the
/// variant carries only the fields valid for it.
#[derive(Debug, Clone)]
pub struct OnboardProfile {
    pub full_name: String,
    /// Digits-only tax document.
    pub document: String,
    pub email: String,
    pub password: SecretString,
    /// Phone with grouping punctuation stripped.
    pub phone: String,
    pub kind: ProfileKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileKind {
    Individual,
    Company { company_name: String },
}

impl OnboardProfile {
    /// Validates and normalizes a raw payload.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::Validation` for an unknown `client_type` or
    /// any missing (or empty) field required by the declared type. A
    /// `company_name` supplied for an individual is dropped, never an error.
    pub fn validate(input: OnboardInput) -> Result<Self, IntakeError> {
        let tag = required(input.client_type, "client_type")?;
        let client_type = ClientType::parse(&tag).ok_or_else(|| {
            IntakeError::Validation(format!("Unknown client_type: {}", tag))
        })?;

        let full_name = required(input.full_name, "full_name")?;
        let document = required(input.document, "document")?;
        let email = required(input.email, "email")?;
        let password = required(input.password, "password")?;
        let phone = required(input.phone, "phone")?;

        validate_email(&email).map_err(|e| IntakeError::Validation(e.to_string()))?;
        validate_password(&password).map_err(|e| IntakeError::Validation(e.to_string()))?;

        let kind = match client_type {
            ClientType::Individual => ProfileKind::Individual,
            ClientType::Company => ProfileKind::Company {
                company_name: required(input.company_name, "company_name")?,
            },
        };

        Ok(Self {
            full_name,
            document: normalize_document(&document),
            email,
            password: SecretString::new(password),
            phone: normalize_phone(&phone),
            kind,
        })
    }

    pub fn client_type(&self) -> ClientType {
        match self.kind {
            ProfileKind::Individual => ClientType::Individual,
            ProfileKind::Company { .. } => ClientType::Company,
        }
    }

    fn company_name(&self) -> Option<String> {
        match &self.kind {
            ProfileKind::Individual => None,
            ProfileKind::Company { company_name } => Some(company_name.clone()),
        }
    }
}

/// Rejects missing and empty-string fields alike.
fn required(field: Option<String>, name: &str) -> Result<String, IntakeError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(IntakeError::Validation(format!(
            "Missing required field: {}",
            name
        ))),
    }
}

/// Generated identifiers for a completed onboarding.
///
/// `company_id`/`contact_id` are populated only for company clients; the
/// individual flow creates a contact too but reports only the client and
/// user ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardOutcome {
    pub client_id: i32,
    pub user_id: i32,
    pub company_id: Option<i32>,
    pub contact_id: Option<i32>,
}

/// One committed step, recorded so it can be undone.
#[derive(Debug)]
enum UndoStep {
    Identity(String),
    Client(i32),
    User(i32),
    Contact(i32),
    Company(i32),
    Link(i32),
}

pub struct OnboardAction<I, C, U, P, M, L> {
    identity: I,
    clients: C,
    users: U,
    contacts: P,
    companies: M,
    links: L,
}

impl<I, C, U, P, M, L> OnboardAction<I, C, U, P, M, L>
where
    I: IdentityProvider,
    C: ClientRepository,
    U: UserRepository,
    P: ContactRepository,
    M: CompanyRepository,
    L: ContactCompanyRepository,
{
    pub fn new(identity: I, clients: C, users: U, contacts: P, companies: M, links: L) -> Self {
        OnboardAction {
            identity,
            clients,
            users,
            contacts,
            companies,
            links,
        }
    }

    /// Runs the full onboarding sequence.
    ///
    /// Validation happens before the first external call; an invalid payload
    /// causes no side effects. After that, any step failure triggers
    /// reverse-order compensation of everything already committed, and the
    /// original error is returned.
    pub async fn execute(&self, input: OnboardInput) -> Result<OnboardOutcome, IntakeError> {
        let profile = OnboardProfile::validate(input)?;

        let identity = self
            .identity
            .create_identity(&profile.email, &profile.password, &profile.full_name)
            .await?;

        let mut undo = vec![UndoStep::Identity(identity.id.clone())];
        match self.create_records(&profile, &identity, &mut undo).await {
            Ok(outcome) => {
                tracing::info!(
                    client_id = outcome.client_id,
                    client_type = profile.client_type().as_str(),
                    "onboarding complete"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(error = %err, "onboarding step failed, compensating");
                self.roll_back(undo).await;
                Err(err)
            }
        }
    }

    async fn create_records(
        &self,
        profile: &OnboardProfile,
        identity: &Identity,
        undo: &mut Vec<UndoStep>,
    ) -> Result<OnboardOutcome, IntakeError> {
        let client = self
            .clients
            .insert_client(NewClient {
                display_name: profile.full_name.clone(),
                company_name: profile.company_name(),
                document: profile.document.clone(),
                email: profile.email.clone(),
                phone: profile.phone.clone(),
                client_type: profile.client_type(),
            })
            .await?;
        undo.push(UndoStep::Client(client.id));

        let hashed = hash_password(&profile.password)?;
        let user = self
            .users
            .insert_user(NewUser {
                client_id: client.id,
                identity_id: identity.id.clone(),
                email: profile.email.clone(),
                full_name: profile.full_name.clone(),
                hashed_password: hashed,
            })
            .await?;
        undo.push(UndoStep::User(user.id));

        let contact_fields = NewContact {
            client_id: client.id,
            user_id: user.id,
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        };

        match &profile.kind {
            ProfileKind::Individual => {
                let contact = self.contacts.insert_contact(contact_fields).await?;
                undo.push(UndoStep::Contact(contact.id));

                Ok(OnboardOutcome {
                    client_id: client.id,
                    user_id: user.id,
                    company_id: None,
                    contact_id: None,
                })
            }
            ProfileKind::Company { company_name } => {
                let company = self
                    .companies
                    .insert_company(NewCompany {
                        client_id: client.id,
                        user_id: user.id,
                        legal_name: company_name.clone(),
                        document: profile.document.clone(),
                    })
                    .await?;
                undo.push(UndoStep::Company(company.id));

                let contact = self.contacts.insert_contact(contact_fields).await?;
                undo.push(UndoStep::Contact(contact.id));

                let link = self
                    .links
                    .insert_contact_company(contact.id, company.id)
                    .await?;
                undo.push(UndoStep::Link(link.id));

                Ok(OnboardOutcome {
                    client_id: client.id,
                    user_id: user.id,
                    company_id: Some(company.id),
                    contact_id: Some(contact.id),
                })
            }
        }
    }

    /// Replays the compensation log in reverse creation order.
    ///
    /// Each undo is attempted independently; a failed undo is logged and
    /// skipped so the remaining steps still get their attempt.
    async fn roll_back(&self, steps: Vec<UndoStep>) {
        for step in steps.into_iter().rev() {
            let result = match &step {
                UndoStep::Link(id) => self.links.delete_contact_company(*id).await,
                UndoStep::Contact(id) => self.contacts.delete_contact(*id).await,
                UndoStep::Company(id) => self.companies.delete_company(*id).await,
                UndoStep::User(id) => self.users.delete_user(*id).await,
                UndoStep::Client(id) => self.clients.delete_client(*id).await,
                UndoStep::Identity(id) => self.identity.delete_identity(id).await,
            };

            if let Err(err) = result {
                tracing::warn!(step = ?step, error = %err, "rollback step failed");
            }
        }
    }
}

fn hash_password(password: &SecretString) -> Result<String, IntakeError> {
    Argon2Hasher::default().hash(password.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MockIdentityProvider;
    use crate::records::{
        MockClientRepository, MockCompanyRepository, MockContactCompanyRepository,
        MockContactRepository, MockUserRepository,
    };

    struct TestBackend {
        identity: MockIdentityProvider,
        clients: MockClientRepository,
        users: MockUserRepository,
        contacts: MockContactRepository,
        companies: MockCompanyRepository,
        links: MockContactCompanyRepository,
    }

    impl TestBackend {
        fn new() -> Self {
            Self {
                identity: MockIdentityProvider::new(),
                clients: MockClientRepository::new(),
                users: MockUserRepository::new(),
                contacts: MockContactRepository::new(),
                companies: MockCompanyRepository::new(),
                links: MockContactCompanyRepository::new(),
            }
        }

        fn action(
            &self,
        ) -> OnboardAction<
            MockIdentityProvider,
            MockClientRepository,
            MockUserRepository,
            MockContactRepository,
            MockCompanyRepository,
            MockContactCompanyRepository,
        > {
            OnboardAction::new(
                self.identity.clone(),
                self.clients.clone(),
                self.users.clone(),
                self.contacts.clone(),
                self.companies.clone(),
                self.links.clone(),
            )
        }

        fn record_counts(&self) -> (usize, usize, usize, usize, usize, usize) {
            (
                self.identity.count(),
                self.clients.count(),
                self.users.count(),
                self.contacts.count(),
                self.companies.count(),
                self.links.count(),
            )
        }
    }

    fn individual_input() -> OnboardInput {
        OnboardInput {
            client_type: Some("individual".to_owned()),
            full_name: Some("João Silva".to_owned()),
            company_name: None,
            document: Some("123.456.789-00".to_owned()),
            email: Some("joao@example.com".to_owned()),
            password: Some("secret123".to_owned()),
            phone: Some("(11) 98888-7777".to_owned()),
        }
    }

    fn company_input() -> OnboardInput {
        OnboardInput {
            client_type: Some("company".to_owned()),
            full_name: Some("Maria Souza".to_owned()),
            company_name: Some("XPTO LTDA".to_owned()),
            document: Some("12.345.678/0001-99".to_owned()),
            email: Some("maria@xpto.com".to_owned()),
            password: Some("secret123".to_owned()),
            phone: Some("(11) 99999-9999".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_individual_creates_exactly_four_records() {
        let backend = TestBackend::new();
        let outcome = backend.action().execute(individual_input()).await.unwrap();

        assert_eq!(backend.record_counts(), (1, 1, 1, 1, 0, 0));
        assert_eq!(outcome.company_id, None);
        assert_eq!(outcome.contact_id, None);

        let client = backend.clients.clients.lock().unwrap()[0].clone();
        assert_eq!(client.id, outcome.client_id);
        assert_eq!(client.document, "12345678900");
        assert_eq!(client.phone, "11988887777");
        assert_eq!(client.company_name, None);
        assert_eq!(client.client_type, ClientType::Individual);

        let user = backend.users.users.lock().unwrap()[0].clone();
        assert_eq!(user.id, outcome.user_id);
        assert_eq!(user.client_id, client.id);
        assert!(!user.identity_id.is_empty());
        assert!(user.hashed_password.starts_with("$argon2"));

        let contact = backend.contacts.contacts.lock().unwrap()[0].clone();
        assert_eq!(contact.client_id, client.id);
        assert_eq!(contact.user_id, user.id);
    }

    #[tokio::test]
    async fn test_company_creates_all_six_records() {
        let backend = TestBackend::new();
        let outcome = backend.action().execute(company_input()).await.unwrap();

        assert_eq!(backend.record_counts(), (1, 1, 1, 1, 1, 1));

        let client = backend.clients.clients.lock().unwrap()[0].clone();
        assert_eq!(client.company_name.as_deref(), Some("XPTO LTDA"));
        assert_eq!(client.document, "12345678000199");
        assert_eq!(client.client_type, ClientType::Company);

        let company = backend.companies.companies.lock().unwrap()[0].clone();
        let contact = backend.contacts.contacts.lock().unwrap()[0].clone();
        assert_eq!(outcome.company_id, Some(company.id));
        assert_eq!(outcome.contact_id, Some(contact.id));

        // the link row joins exactly this request's contact and company
        let link = backend.links.links.lock().unwrap()[0].clone();
        assert_eq!(link.contact_id, contact.id);
        assert_eq!(link.company_id, company.id);
    }

    #[tokio::test]
    async fn test_missing_field_makes_no_external_calls() {
        for missing in [
            "client_type",
            "full_name",
            "document",
            "email",
            "password",
            "phone",
        ] {
            let backend = TestBackend::new();
            let mut input = individual_input();
            match missing {
                "client_type" => input.client_type = None,
                "full_name" => input.full_name = None,
                "document" => input.document = None,
                "email" => input.email = None,
                "password" => input.password = None,
                "phone" => input.phone = None,
                _ => unreachable!(),
            }

            let err = backend.action().execute(input).await.unwrap_err();
            assert!(
                matches!(err, IntakeError::Validation(ref msg) if msg.contains(missing)),
                "expected validation error naming {missing}, got {err:?}"
            );
            assert_eq!(backend.record_counts(), (0, 0, 0, 0, 0, 0));
        }
    }

    #[tokio::test]
    async fn test_empty_string_counts_as_missing() {
        let backend = TestBackend::new();
        let mut input = individual_input();
        input.document = Some("".to_owned());

        let err = backend.action().execute(input).await.unwrap_err();
        assert!(matches!(err, IntakeError::Validation(ref msg) if msg.contains("document")));
        assert_eq!(backend.record_counts(), (0, 0, 0, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_unknown_client_type_rejected() {
        let backend = TestBackend::new();
        let mut input = individual_input();
        input.client_type = Some("partnership".to_owned());

        let err = backend.action().execute(input).await.unwrap_err();
        assert!(matches!(err, IntakeError::Validation(ref msg) if msg.contains("partnership")));
        assert_eq!(backend.record_counts(), (0, 0, 0, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_company_requires_company_name() {
        let backend = TestBackend::new();
        let mut input = company_input();
        input.company_name = None;

        let err = backend.action().execute(input).await.unwrap_err();
        assert!(matches!(err, IntakeError::Validation(ref msg) if msg.contains("company_name")));
        assert_eq!(backend.record_counts(), (0, 0, 0, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_company_name_ignored_for_individual() {
        let backend = TestBackend::new();
        let mut input = individual_input();
        input.company_name = Some("Should Be Dropped".to_owned());

        backend.action().execute(input).await.unwrap();

        let client = backend.clients.clients.lock().unwrap()[0].clone();
        assert_eq!(client.company_name, None);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict_with_no_residue() {
        let backend = TestBackend::new();
        backend.action().execute(individual_input()).await.unwrap();

        let err = backend.action().execute(individual_input()).await.unwrap_err();
        assert!(matches!(err, IntakeError::Conflict(_)));

        // only the first onboarding's records exist
        assert_eq!(backend.record_counts(), (1, 1, 1, 1, 0, 0));
    }

    #[tokio::test]
    async fn test_contact_failure_rolls_back_company_flow() {
        let backend = TestBackend::new();
        backend.contacts.set_fail_inserts(true);

        let err = backend.action().execute(company_input()).await.unwrap_err();

        // the caller sees the contact insert's error, not a rollback error
        assert_eq!(
            err,
            IntakeError::Dependency("contact insert failed".to_owned())
        );
        // company, user, client and identity were all compensated
        assert_eq!(backend.record_counts(), (0, 0, 0, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_user_failure_rolls_back_client_and_identity() {
        let backend = TestBackend::new();
        backend.users.set_fail_inserts(true);

        let err = backend.action().execute(individual_input()).await.unwrap_err();
        assert_eq!(err, IntakeError::Dependency("user insert failed".to_owned()));
        assert_eq!(backend.record_counts(), (0, 0, 0, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_rollback_continues_past_a_failing_undo() {
        let backend = TestBackend::new();
        backend.contacts.set_fail_inserts(true);
        backend.companies.set_fail_deletes(true);

        let err = backend.action().execute(company_input()).await.unwrap_err();

        // original error survives even though one undo step failed
        assert_eq!(
            err,
            IntakeError::Dependency("contact insert failed".to_owned())
        );
        // the company undo failed and its row is stranded, but every step
        // before it was still attempted and undone
        assert_eq!(backend.companies.count(), 1);
        assert_eq!(backend.users.count(), 0);
        assert_eq!(backend.clients.count(), 0);
        assert_eq!(backend.identity.count(), 0);
    }

    #[tokio::test]
    async fn test_identity_failure_leaves_nothing() {
        let backend = TestBackend::new();
        backend.identity.set_fail_creates(true);

        let err = backend.action().execute(individual_input()).await.unwrap_err();
        assert!(matches!(err, IntakeError::Dependency(_)));
        assert_eq!(backend.record_counts(), (0, 0, 0, 0, 0, 0));
    }

    #[test]
    fn test_validate_normalizes_document_and_phone() {
        let profile = OnboardProfile::validate(company_input()).unwrap();
        assert_eq!(profile.document, "12345678000199");
        assert_eq!(profile.phone, "11999999999");
        assert_eq!(profile.client_type(), ClientType::Company);
    }
}
