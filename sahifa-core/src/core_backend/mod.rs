//! The mock backend service.
//!
//! [`ContentBackend`] owns the aggregate, the three fallback-probed
//! stores, and the session manager. Every mutation rewrites the
//! aggregate through the best-effort store; every failure is a
//! [`BackendError`] raised synchronously — no retries, no partial
//! success.

mod payloads;
mod responses;

pub use payloads::{
    ArticlePayload, LoginPayload, NewsletterPayload, PollPayload, RatingPayload,
    RegisterPayload, TagsInput, UserPayload, VotePayload,
};
pub use responses::{
    ArticleResponse, AuthResponse, MessageResponse, PollOptionView, PollResultsView,
    UserResponse,
};

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::core_session::SessionManager;
use crate::core_store::{
    with_fallback, AggregateStore, FileStore, KeyValueStore, MemoryStore,
};
use crate::error::{BackendError, BackendResult};
use crate::model::{
    seed, Aggregate, PollId, Post, PostId, PostStatus, Role, User, UserId, DATA_VERSION,
};
use crate::text;

/// Key namespace for per-poll vote markers.
pub const POLL_VOTE_PREFIX: &str = "sahifa-poll-vote-";

/// Poll the results route falls back to when no id is given.
pub const DEFAULT_POLL_ID: &str = "homepage-theme";

/// Password assigned to admin-created accounts.
pub const DEFAULT_PASSWORD: &str = "password123";

const REGISTER_AVATAR: &str = "assets/images/thumb-6.svg";
const STOCK_ARTICLE_IMAGE: &str = "assets/images/article-4.svg";
const EXCERPT_CHARS: usize = 160;
const MIN_PASSWORD_CHARS: usize = 6;

/// Read filter for the post collection.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Exact category match; `None` or the sentinel `"all"` skips it.
    pub category: Option<String>,
    /// Tag membership.
    pub tag: Option<String>,
    /// Truncate the sorted result.
    pub limit: Option<usize>,
}

pub struct ContentBackend {
    data: Aggregate,
    store: AggregateStore,
    sessions: SessionManager,
    votes: Box<dyn KeyValueStore>,
}

impl ContentBackend {
    /// Build a backend over file stores rooted in the configured data
    /// directory, each independently falling back to memory when the
    /// probe write fails.
    pub fn new(config: &Config) -> Self {
        let data_dir = &config.store.data_dir;
        let aggregate = with_fallback(
            Box::new(FileStore::new(data_dir.join("store"))),
            Box::new(MemoryStore::new()),
        );
        let session = with_fallback(
            Box::new(FileStore::new(data_dir.join("session"))),
            Box::new(MemoryStore::new()),
        );
        let votes = with_fallback(
            Box::new(FileStore::new(data_dir.join("votes"))),
            Box::new(MemoryStore::new()),
        );
        Self::with_stores(aggregate, session, votes)
    }

    /// Build a backend over explicit stores. Loads the persisted
    /// aggregate and re-seeds on absence or schema-tag mismatch.
    pub fn with_stores(
        aggregate: Box<dyn KeyValueStore>,
        session: Box<dyn KeyValueStore>,
        votes: Box<dyn KeyValueStore>,
    ) -> Self {
        let mut store = AggregateStore::new(aggregate);
        let data = match store.load() {
            Some(data) if data.version == DATA_VERSION => data,
            Some(data) => {
                warn!(
                    persisted = %data.version,
                    expected = DATA_VERSION,
                    "schema tag mismatch, re-seeding demo data"
                );
                let fresh = seed();
                store.save(&fresh);
                fresh
            }
            None => {
                info!("no persisted aggregate, seeding demo data");
                let fresh = seed();
                store.save(&fresh);
                fresh
            }
        };
        Self {
            data,
            store,
            sessions: SessionManager::new(session),
            votes,
        }
    }

    /// Purely in-memory backend; nothing survives the instance.
    pub fn in_memory() -> Self {
        Self::with_stores(
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        )
    }

    fn persist(&mut self) {
        self.store.save(&self.data);
    }

    /// The password-stripped current user: none without a session, and
    /// none when the session points at an account that no longer
    /// exists.
    pub fn current_user(&self) -> Option<crate::model::PublicUser> {
        let session = self.sessions.current()?;
        self.data
            .users
            .iter()
            .find(|user| user.id == session.user_id)
            .map(User::to_public)
    }

    fn require_auth(&self) -> BackendResult<crate::model::PublicUser> {
        self.current_user().ok_or(BackendError::Unauthenticated)
    }

    pub fn login(&mut self, payload: LoginPayload) -> BackendResult<AuthResponse> {
        let email = payload.email.trim().to_lowercase();
        let password = payload.password.trim();

        let user = self
            .data
            .user_by_email(&email)
            .filter(|user| user.password == password)
            .ok_or(BackendError::InvalidCredentials)?;

        let public = user.to_public();
        let message = format!("مرحباً {}!", user.name);
        let user_id = user.id.clone();
        self.sessions.start(&user_id);
        info!(user = %user_id, "login");
        Ok(AuthResponse {
            message,
            user: public,
        })
    }

    pub fn register(&mut self, payload: RegisterPayload) -> BackendResult<AuthResponse> {
        let full_name = payload.full_name.trim().to_string();
        let email = payload.email.trim().to_lowercase();
        let password = payload.password.trim().to_string();
        let confirm = payload.confirm_password.trim();

        if full_name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(BackendError::Validation(
                "يرجى تعبئة الحقول المطلوبة".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(BackendError::Validation(
                "كلمة المرور يجب ألا تقل عن 6 أحرف".to_string(),
            ));
        }
        if password != confirm {
            return Err(BackendError::Validation(
                "كلمتا المرور غير متطابقتان".to_string(),
            ));
        }
        if self.data.email_taken(&email) {
            return Err(BackendError::DuplicateEmail);
        }

        let user = User {
            id: UserId::generate(),
            name: full_name,
            email,
            password,
            role: Role::Contributor,
            avatar: Some(REGISTER_AVATAR.to_string()),
        };
        let public = user.to_public();
        let user_id = user.id.clone();
        self.data.users.push(user);
        self.persist();
        self.sessions.start(&user_id);
        info!(user = %user_id, "account registered");
        Ok(AuthResponse {
            message: "تم إنشاء الحساب بنجاح".to_string(),
            user: public,
        })
    }

    pub fn logout(&mut self) -> MessageResponse {
        self.sessions.end();
        MessageResponse {
            message: "تم تسجيل الخروج بنجاح".to_string(),
        }
    }

    pub fn subscribe_newsletter(
        &mut self,
        payload: NewsletterPayload,
    ) -> BackendResult<MessageResponse> {
        let email = payload.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(BackendError::Validation(
                "يرجى إدخال البريد الإلكتروني".to_string(),
            ));
        }
        if !text::is_valid_email(&email) {
            return Err(BackendError::Validation(
                "البريد الإلكتروني غير صالح".to_string(),
            ));
        }
        if self.data.newsletter_subscribers.contains(&email) {
            return Ok(MessageResponse {
                message: "أنت مشترك بالفعل في النشرة".to_string(),
            });
        }
        self.data.newsletter_subscribers.push(email);
        self.persist();
        Ok(MessageResponse {
            message: "✓ تم الاشتراك في النشرة".to_string(),
        })
    }

    fn vote_key(poll_id: &str) -> String {
        format!("{}{}", POLL_VOTE_PREFIX, poll_id)
    }

    fn recorded_vote(&self, poll_id: &str) -> Option<String> {
        self.votes.get(&Self::vote_key(poll_id))
    }

    pub fn vote_poll(&mut self, payload: VotePayload) -> BackendResult<PollResultsView> {
        let poll_id = payload.poll_id;
        let theme = payload.theme;

        {
            let poll = self
                .data
                .polls
                .get(&PollId::new(poll_id.clone()))
                .ok_or_else(poll_not_found)?;
            if !poll.options.contains_key(&theme) {
                return Err(BackendError::InvalidOption);
            }
        }
        if self.recorded_vote(&poll_id).is_some() {
            return Err(BackendError::AlreadyVoted);
        }

        if let Some(option) = self
            .data
            .polls
            .get_mut(&PollId::new(poll_id.clone()))
            .and_then(|poll| poll.options.get_mut(&theme))
        {
            option.votes += 1;
        }
        if let Err(err) = self.votes.set(&Self::vote_key(&poll_id), &theme) {
            warn!("vote marker write failed: {}", err);
        }
        self.persist();
        self.poll_results(&poll_id, Some(theme.as_str()))
    }

    /// The poll-results projection. The selection comes from the
    /// explicit argument or, absent that, the stored vote marker.
    pub fn poll_results(
        &self,
        poll_id: &str,
        selected: Option<&str>,
    ) -> BackendResult<PollResultsView> {
        let poll = self
            .data
            .polls
            .get(&PollId::new(poll_id))
            .ok_or_else(poll_not_found)?;

        let total = poll.total_votes();
        let vote = selected
            .map(str::to_string)
            .or_else(|| self.recorded_vote(poll_id));

        let options = poll
            .options
            .values()
            .map(|option| {
                let percent = if total > 0 {
                    ((option.votes as f64 / total as f64) * 100.0).round() as u32
                } else {
                    0
                };
                PollOptionView {
                    value: option.value.clone(),
                    label: option.label.clone(),
                    votes: option.votes,
                    percent,
                }
            })
            .collect();

        Ok(PollResultsView {
            poll_id: poll.id.to_string(),
            title: poll.title.clone(),
            options,
            total_votes: total,
            has_voted: vote.is_some(),
            selected_option: vote,
        })
    }

    /// Filtered, newest-first view of the post collection. Pure read.
    pub fn get_posts(&self, filter: &PostFilter) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .data
            .posts
            .iter()
            .filter(|post| match filter.category.as_deref() {
                None | Some("all") => true,
                Some(category) => post.category == category,
            })
            .filter(|post| match filter.tag.as_deref() {
                None => true,
                Some(tag) => post.tags.iter().any(|t| t == tag),
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        if let Some(limit) = filter.limit {
            posts.truncate(limit);
        }
        posts
    }

    pub fn get_post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.data.post_by_slug(slug)
    }

    /// Next free slug: the base itself, or `base-2`, `base-3`, …
    fn unique_slug(&self, base: &str) -> String {
        if !self.data.slug_taken(base) {
            return base.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.data.slug_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn create_article(&mut self, payload: ArticlePayload) -> BackendResult<ArticleResponse> {
        let author = self.require_auth()?;

        if payload.title.trim().is_empty() || payload.body.trim().is_empty() {
            return Err(BackendError::Validation(
                "يرجى إدخال عنوان ومحتوى للمقال".to_string(),
            ));
        }

        let base_slug = {
            let slug = text::slugify(&payload.title);
            if slug.is_empty() {
                "article".to_string()
            } else {
                slug
            }
        };
        let slug = self.unique_slug(&base_slug);

        let tags = payload.tags.map(TagsInput::into_tags).unwrap_or_default();
        let category = payload
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "misc".to_string());

        let mut rng = rand::rng();
        let post = Post {
            id: PostId::generate(),
            slug,
            title: payload.title,
            author: author.name,
            published_at: Utc::now(),
            category,
            tags,
            excerpt: text::excerpt(&payload.body, EXCERPT_CHARS),
            hero_image: STOCK_ARTICLE_IMAGE.to_string(),
            card_image: STOCK_ARTICLE_IMAGE.to_string(),
            body: text::normalize_paragraphs(&payload.body),
            comments: 0,
            status: PostStatus::Published,
            trending_score: rng.random_range(4..=9),
            recommended_score: rng.random_range(4..=9),
        };

        // prepended so newest-first ordering holds without re-sorting
        self.data.posts.insert(0, post.clone());
        self.persist();
        info!(slug = %post.slug, "article published");
        Ok(ArticleResponse {
            message: "تم حفظ المقال ونشره فوراً".to_string(),
            article: post,
        })
    }

    pub fn create_poll(&mut self, payload: PollPayload) -> BackendResult<MessageResponse> {
        self.require_auth()?;

        if payload.question.trim().is_empty() || payload.options.trim().is_empty() {
            return Err(BackendError::Validation(
                "يرجى إدخال سؤال وخيارات الاستطلاع".to_string(),
            ));
        }
        let labels: Vec<&str> = payload
            .options
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if labels.len() < 2 {
            return Err(BackendError::Validation(
                "أدخل خيارين على الأقل".to_string(),
            ));
        }

        let poll = crate::model::Poll::from_labels(
            PollId::generate(),
            payload.question.trim(),
            labels,
        );
        self.data.polls.insert(poll.id.clone(), poll);
        self.persist();
        Ok(MessageResponse {
            message: "تم إنشاء الاستطلاع".to_string(),
        })
    }

    pub fn create_user(&mut self, payload: UserPayload) -> BackendResult<UserResponse> {
        self.require_auth()?;

        let full_name = payload.full_name.trim().to_string();
        let email = payload.email.trim().to_lowercase();
        if full_name.is_empty() || email.is_empty() {
            return Err(BackendError::Validation(
                "يرجى إدخال اسم وبريد المستخدم".to_string(),
            ));
        }
        if self.data.email_taken(&email) {
            return Err(BackendError::DuplicateEmail);
        }

        let user = User {
            id: UserId::generate(),
            name: full_name,
            email,
            password: DEFAULT_PASSWORD.to_string(),
            role: payload.role.unwrap_or_default(),
            avatar: None,
        };
        let public = user.to_public();
        self.data.users.push(user);
        self.persist();
        Ok(UserResponse {
            message: "تم إضافة المستخدم بكلمة مرور افتراضية".to_string(),
            user: public,
        })
    }

    pub fn rate_article(
        &mut self,
        slug: &str,
        payload: RatingPayload,
    ) -> BackendResult<MessageResponse> {
        let rating = payload
            .rating
            .filter(|value| *value > 0)
            .ok_or_else(|| BackendError::Validation("يرجى اختيار تقييم".to_string()))?;
        if self.data.post_by_slug(slug).is_none() {
            return Err(BackendError::NotFound("المقال غير موجود".to_string()));
        }

        self.data
            .ratings
            .entry(slug.to_string())
            .or_default()
            .push(crate::model::RatingEntry {
                rating,
                at: Utc::now(),
            });
        self.persist();
        Ok(MessageResponse {
            message: "شكراً لتقييمك المحتوى".to_string(),
        })
    }
}

fn poll_not_found() -> BackendError {
    BackendError::NotFound("الاستطلاع غير متاح حالياً".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_session::{SessionRecord, SESSION_KEY};

    const ADMIN_EMAIL: &str = "admin@sahifa.com";
    const ADMIN_PASSWORD: &str = "sahifa123";

    fn backend() -> ContentBackend {
        ContentBackend::in_memory()
    }

    fn logged_in_backend() -> ContentBackend {
        let mut backend = backend();
        backend
            .login(LoginPayload {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .unwrap();
        backend
    }

    fn vote_payload(option: &str) -> VotePayload {
        VotePayload {
            poll_id: DEFAULT_POLL_ID.to_string(),
            theme: option.to_string(),
        }
    }

    #[test]
    fn test_login_with_seeded_admin() {
        let mut backend = backend();
        let response = backend
            .login(LoginPayload {
                email: "  ADMIN@sahifa.com ".to_string(),
                password: " sahifa123 ".to_string(),
            })
            .unwrap();

        assert!(response.message.contains("مرحباً"));
        assert_eq!(response.user.email, ADMIN_EMAIL);

        let current = backend.current_user().unwrap();
        assert_eq!(current.id, response.user.id);
        let json = serde_json::to_value(&current).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_login_failures_leave_session_untouched() {
        let mut backend = logged_in_backend();
        let before = backend.current_user().unwrap();

        let wrong_password = backend.login(LoginPayload {
            email: ADMIN_EMAIL.to_string(),
            password: "nope".to_string(),
        });
        assert_eq!(wrong_password.unwrap_err(), BackendError::InvalidCredentials);

        let unknown_email = backend.login(LoginPayload {
            email: "ghost@sahifa.com".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        });
        assert_eq!(unknown_email.unwrap_err(), BackendError::InvalidCredentials);

        assert_eq!(backend.current_user().unwrap().id, before.id);
    }

    #[test]
    fn test_register_password_rules() {
        let mut backend = backend();

        let short = backend.register(RegisterPayload {
            full_name: "قارئ".to_string(),
            email: "reader@sahifa.com".to_string(),
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
        });
        assert!(matches!(short.unwrap_err(), BackendError::Validation(_)));

        let mismatch = backend.register(RegisterPayload {
            full_name: "قارئ".to_string(),
            email: "reader@sahifa.com".to_string(),
            password: "123456".to_string(),
            confirm_password: "654321".to_string(),
        });
        assert!(matches!(mismatch.unwrap_err(), BackendError::Validation(_)));

        let ok = backend
            .register(RegisterPayload {
                full_name: "قارئ".to_string(),
                email: "reader@sahifa.com".to_string(),
                password: "123456".to_string(),
                confirm_password: "123456".to_string(),
            })
            .unwrap();
        assert_eq!(ok.user.role, Role::Contributor);
        assert!(backend.current_user().is_some());
    }

    #[test]
    fn test_register_duplicate_email_case_insensitive() {
        let mut backend = backend();
        let payload = RegisterPayload {
            full_name: "قارئ".to_string(),
            email: "Reader@Sahifa.com".to_string(),
            password: "123456".to_string(),
            confirm_password: "123456".to_string(),
        };
        backend.register(payload.clone()).unwrap();

        let second = backend.register(RegisterPayload {
            email: "reader@sahifa.COM".to_string(),
            ..payload
        });
        assert_eq!(second.unwrap_err(), BackendError::DuplicateEmail);
    }

    #[test]
    fn test_logout_clears_session() {
        let mut backend = logged_in_backend();
        let response = backend.logout();
        assert!(!response.message.is_empty());
        assert!(backend.current_user().is_none());
        // a second logout is harmless
        backend.logout();
    }

    #[test]
    fn test_dangling_session_resolves_to_no_user() {
        let mut session_store = MemoryStore::new();
        let record = SessionRecord {
            user_id: UserId::new("user-ghost"),
            logged_in_at: Utc::now(),
        };
        session_store
            .set(SESSION_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();

        let backend = ContentBackend::with_stores(
            Box::new(MemoryStore::new()),
            Box::new(session_store),
            Box::new(MemoryStore::new()),
        );
        assert!(backend.current_user().is_none());
    }

    #[test]
    fn test_newsletter_validation_and_idempotency() {
        let mut backend = backend();

        let blank = backend.subscribe_newsletter(NewsletterPayload::default());
        assert!(matches!(blank.unwrap_err(), BackendError::Validation(_)));

        let malformed = backend.subscribe_newsletter(NewsletterPayload {
            email: "not-an-email".to_string(),
        });
        assert!(matches!(malformed.unwrap_err(), BackendError::Validation(_)));

        let first = backend
            .subscribe_newsletter(NewsletterPayload {
                email: " Reader@Sahifa.com ".to_string(),
            })
            .unwrap();
        assert!(first.message.contains("تم الاشتراك"));

        let second = backend
            .subscribe_newsletter(NewsletterPayload {
                email: "reader@sahifa.com".to_string(),
            })
            .unwrap();
        assert!(second.message.contains("مشترك بالفعل"));
    }

    #[test]
    fn test_vote_succeeds_exactly_once() {
        let mut backend = backend();

        let results = backend.vote_poll(vote_payload("dark")).unwrap();
        assert!(results.has_voted);
        assert_eq!(results.selected_option.as_deref(), Some("dark"));
        assert_eq!(results.total_votes, 79);
        let dark = results.options.iter().find(|o| o.value == "dark").unwrap();
        assert_eq!(dark.votes, 25);

        let again = backend.vote_poll(vote_payload("light"));
        assert_eq!(again.unwrap_err(), BackendError::AlreadyVoted);

        // counts reflect exactly one increment
        let results = backend.poll_results(DEFAULT_POLL_ID, None).unwrap();
        assert_eq!(results.total_votes, 79);
    }

    #[test]
    fn test_vote_rejects_unknown_poll_and_option() {
        let mut backend = backend();

        let missing = backend.vote_poll(VotePayload {
            poll_id: "nope".to_string(),
            theme: "light".to_string(),
        });
        assert!(matches!(missing.unwrap_err(), BackendError::NotFound(_)));

        let bad_option = backend.vote_poll(vote_payload("neon"));
        assert_eq!(bad_option.unwrap_err(), BackendError::InvalidOption);
    }

    #[test]
    fn test_seeded_poll_percentages() {
        let backend = backend();
        let results = backend.poll_results(DEFAULT_POLL_ID, None).unwrap();

        assert!(!results.has_voted);
        assert_eq!(results.total_votes, 78);
        let percent = |value: &str| {
            results
                .options
                .iter()
                .find(|o| o.value == value)
                .unwrap()
                .percent
        };
        assert_eq!(percent("light"), 54);
        assert_eq!(percent("dark"), 31);
        assert_eq!(percent("sepia"), 15);
    }

    #[test]
    fn test_zero_vote_poll_yields_zero_percents() {
        let mut backend = logged_in_backend();
        backend
            .create_poll(PollPayload {
                question: "سؤال جديد؟".to_string(),
                options: "نعم\nلا".to_string(),
            })
            .unwrap();

        let poll_id = {
            let results: Vec<_> = backend
                .data
                .polls
                .keys()
                .filter(|id| id.0 != DEFAULT_POLL_ID)
                .cloned()
                .collect();
            results[0].clone()
        };
        let results = backend.poll_results(&poll_id.0, None).unwrap();
        assert_eq!(results.total_votes, 0);
        assert!(results.options.iter().all(|o| o.percent == 0));
        assert!(!results.has_voted);
    }

    #[test]
    fn test_get_posts_filters_and_sorting() {
        let backend = backend();

        let logic = backend.get_posts(&PostFilter {
            category: Some("logic".to_string()),
            ..Default::default()
        });
        assert_eq!(logic.len(), 2);
        assert!(logic.iter().all(|p| p.category == "logic"));
        assert!(logic[0].published_at > logic[1].published_at);

        let all = backend.get_posts(&PostFilter {
            category: Some("all".to_string()),
            ..Default::default()
        });
        assert_eq!(all.len(), 6);

        let tagged = backend.get_posts(&PostFilter {
            tag: Some("المنطق".to_string()),
            ..Default::default()
        });
        assert_eq!(tagged.len(), 2);

        let limited = backend.get_posts(&PostFilter {
            limit: Some(3),
            ..Default::default()
        });
        assert_eq!(limited.len(), 3);
        assert!(limited[0].published_at >= limited[1].published_at);
    }

    #[test]
    fn test_get_post_by_slug() {
        let backend = backend();
        assert!(backend.get_post_by_slug("building-rational-discourse").is_some());
        assert!(backend.get_post_by_slug("missing").is_none());
    }

    #[test]
    fn test_create_article_requires_session() {
        let mut backend = backend();
        let result = backend.create_article(ArticlePayload {
            title: "عنوان".to_string(),
            body: "نص".to_string(),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err(), BackendError::Unauthenticated);
    }

    #[test]
    fn test_create_article_fields() {
        let mut backend = logged_in_backend();
        let body = "الفقرة الأولى\n\nالفقرة الثانية";
        let response = backend
            .create_article(ArticlePayload {
                title: "مقال تجريبي جديد".to_string(),
                category: Some("logic".to_string()),
                tags: Some(TagsInput::Text("المنطق، النقد".to_string())),
                body: body.to_string(),
            })
            .unwrap();

        let article = &response.article;
        assert_eq!(article.slug, "مقال-تجريبي-جديد");
        assert_eq!(article.author, "سارة المدير");
        assert_eq!(article.category, "logic");
        assert_eq!(article.tags, vec!["المنطق", "النقد"]);
        assert_eq!(article.body, "<p>الفقرة الأولى</p><p>الفقرة الثانية</p>");
        assert_eq!(article.excerpt, body);
        assert_eq!(article.comments, 0);
        assert_eq!(article.status, PostStatus::Published);
        assert!((4..=9).contains(&article.trending_score));
        assert!((4..=9).contains(&article.recommended_score));

        // prepended: newest-first without re-sorting
        let posts = backend.get_posts(&PostFilter::default());
        assert_eq!(posts[0].slug, article.slug);
    }

    #[test]
    fn test_create_article_excerpt_truncates() {
        let mut backend = logged_in_backend();
        let body = "م".repeat(200);
        let response = backend
            .create_article(ArticlePayload {
                title: "عنوان".to_string(),
                body,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(response.article.excerpt.chars().count(), 163);
        assert!(response.article.excerpt.ends_with("..."));
        assert_eq!(response.article.category, "misc");
    }

    #[test]
    fn test_duplicate_titles_get_disambiguated_slugs() {
        let mut backend = logged_in_backend();
        let payload = || ArticlePayload {
            title: "Same Title".to_string(),
            body: "content".to_string(),
            ..Default::default()
        };

        let first = backend.create_article(payload()).unwrap();
        let second = backend.create_article(payload()).unwrap();
        let third = backend.create_article(payload()).unwrap();

        assert_eq!(first.article.slug, "same-title");
        assert_eq!(second.article.slug, "same-title-2");
        assert_eq!(third.article.slug, "same-title-3");
    }

    #[test]
    fn test_create_article_blank_fields() {
        let mut backend = logged_in_backend();
        let result = backend.create_article(ArticlePayload {
            title: "  ".to_string(),
            body: "نص".to_string(),
            ..Default::default()
        });
        assert!(matches!(result.unwrap_err(), BackendError::Validation(_)));
    }

    #[test]
    fn test_create_poll_needs_two_options() {
        let mut backend = logged_in_backend();

        let one = backend.create_poll(PollPayload {
            question: "سؤال؟".to_string(),
            options: "وحيد\n\n  \n".to_string(),
        });
        assert!(matches!(one.unwrap_err(), BackendError::Validation(_)));

        let ok = backend
            .create_poll(PollPayload {
                question: "سؤال؟".to_string(),
                options: "  أول \nثانٍ\r\n".to_string(),
            })
            .unwrap();
        assert!(ok.message.contains("تم إنشاء"));
    }

    #[test]
    fn test_create_poll_requires_auth() {
        let mut backend = backend();
        let result = backend.create_poll(PollPayload {
            question: "سؤال؟".to_string(),
            options: "أ\nب".to_string(),
        });
        assert_eq!(result.unwrap_err(), BackendError::Unauthenticated);
    }

    #[test]
    fn test_create_user_defaults() {
        let mut backend = logged_in_backend();
        let response = backend
            .create_user(UserPayload {
                full_name: "محرر جديد".to_string(),
                email: "NEW@Sahifa.com".to_string(),
                role: None,
            })
            .unwrap();

        assert!(response.message.contains("كلمة مرور افتراضية"));
        assert_eq!(response.user.role, Role::Contributor);
        assert_eq!(response.user.email, "new@sahifa.com");
        assert!(response.user.avatar.is_none());

        // the default password works for login
        let login = backend.login(LoginPayload {
            email: "new@sahifa.com".to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        });
        assert!(login.is_ok());
    }

    #[test]
    fn test_create_user_duplicate_email() {
        let mut backend = logged_in_backend();
        let result = backend.create_user(UserPayload {
            full_name: "أحد".to_string(),
            email: ADMIN_EMAIL.to_string(),
            role: Some(Role::Editor),
        });
        assert_eq!(result.unwrap_err(), BackendError::DuplicateEmail);
    }

    #[test]
    fn test_rate_article() {
        let mut backend = backend();

        let missing_rating =
            backend.rate_article("building-rational-discourse", RatingPayload::default());
        assert!(matches!(
            missing_rating.unwrap_err(),
            BackendError::Validation(_)
        ));

        let zero_rating = backend.rate_article(
            "building-rational-discourse",
            RatingPayload { rating: Some(0) },
        );
        assert!(matches!(
            zero_rating.unwrap_err(),
            BackendError::Validation(_)
        ));

        let unknown = backend.rate_article("missing", RatingPayload { rating: Some(5) });
        assert!(matches!(unknown.unwrap_err(), BackendError::NotFound(_)));

        let ok = backend
            .rate_article(
                "building-rational-discourse",
                RatingPayload { rating: Some(5) },
            )
            .unwrap();
        assert!(ok.message.contains("شكراً"));

        // append-only: a second rating is recorded, not merged
        backend
            .rate_article(
                "building-rational-discourse",
                RatingPayload { rating: Some(2) },
            )
            .unwrap();
        assert_eq!(backend.data.ratings["building-rational-discourse"].len(), 2);
    }
}
