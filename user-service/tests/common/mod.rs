use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthorizationClaims;
use auth::Authenticator;
use auth::JwtHandler;
use auth::SigningContext;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use tokio::sync::RwLock;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::TokenSettings;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::models::UserName;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::user::errors::UserError;

pub const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ISSUER: &str = "user-service";
pub const SEED_EMAIL: &str = "admin@example.com";
pub const SEED_PASSWORD: &str = "pass_word!";

/// Repository keeping users in memory, enforcing the unique email rule.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    fn email_taken(users: &HashMap<UserId, User>, user: &User) -> bool {
        users
            .values()
            .any(|other| other.id != user.id && other.email == user.email)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if Self::email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if Self::email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<i64, UserError> {
        Ok(self.users.read().await.len() as i64)
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub seeded_user: User,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let context = SigningContext::new(SECRET, Duration::hours(1));
        let authenticator = Arc::new(Authenticator::new(&context));

        // Sign-up sits behind the gate, so the first account is seeded directly.
        let repository = Arc::new(InMemoryUserRepository::default());
        let seeded_user = User {
            id: UserId::new(),
            name: UserName::new("Admin".to_string()).unwrap(),
            email: EmailAddress::new(SEED_EMAIL.to_string()).unwrap(),
            password_hash: authenticator.hash_password(SEED_PASSWORD).unwrap(),
            created_at: Utc::now(),
        };
        repository.create(seeded_user.clone()).await.unwrap();

        let user_service = Arc::new(UserService::new(
            repository,
            Arc::clone(&authenticator),
            TokenSettings {
                issuer: ISSUER.to_string(),
                audience: ISSUER.to_string(),
            },
        ));

        let router = create_router(user_service, authenticator, None);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(&context),
            seeded_user,
        }
    }

    /// Token for the seeded user, minted as of `now`.
    pub fn token_at(&self, now: DateTime<Utc>) -> String {
        let claims = AuthorizationClaims::new(self.seeded_user.id)
            .with_name(self.seeded_user.name.as_str())
            .with_issuer(ISSUER)
            .with_audience(ISSUER);

        self.jwt_handler
            .generate_token_at(&claims, now)
            .expect("Failed to generate token")
    }

    pub fn token(&self) -> String {
        self.token_at(Utc::now())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(self.token())
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(self.token())
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(self.token())
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(self.url(path))
            .bearer_auth(self.token())
    }
}
