//! Admin dashboard shell: login gate plus the three tabbed panels.

use crate::api::{ApiError, Media, Quotes, Services};
use crate::auth::LoginForm;
use crate::panel::Panel;
use crate::session::AppContext;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Services,
    Media,
    Quotes,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Services => "service",
            Tab::Media => "media",
            Tab::Quotes => "quote",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "service" | "services" => Ok(Tab::Services),
            "media" => Ok(Tab::Media),
            "quote" | "quotes" => Ok(Tab::Quotes),
            other => anyhow::bail!("Unknown tab '{}'. Expected service, media or quote", other),
        }
    }
}

/// What the dashboard route shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Panel(Tab),
}

pub struct Dashboard {
    ctx: Arc<AppContext>,
    tab: Tab,
    loaded: HashSet<Tab>,
    services: Panel<Services>,
    media: Panel<Media>,
    quotes: Panel<Quotes>,
}

impl Dashboard {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            services: Panel::new(ctx.client.clone(), Arc::clone(&ctx.config), ctx.notices.clone()),
            media: Panel::new(ctx.client.clone(), Arc::clone(&ctx.config), ctx.notices.clone()),
            quotes: Panel::new(ctx.client.clone(), Arc::clone(&ctx.config), ctx.notices.clone()),
            ctx,
            tab: Tab::default(),
            loaded: HashSet::new(),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn view(&self) -> View {
        if self.ctx.session.is_authenticated() {
            View::Panel(self.tab)
        } else {
            View::Login
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn greeting(&self) -> Option<String> {
        self.ctx
            .session
            .is_authenticated()
            .then(|| self.ctx.session.greeting())
    }

    pub fn services(&self) -> &Panel<Services> {
        &self.services
    }

    pub fn media(&self) -> &Panel<Media> {
        &self.media
    }

    pub fn quotes(&self) -> &Panel<Quotes> {
        &self.quotes
    }

    /// Switch tabs, loading the panel the first time it is shown.
    pub async fn show(&mut self, tab: Tab) -> Result<(), ApiError> {
        self.tab = tab;
        if !self.ctx.session.is_authenticated() || self.loaded.contains(&tab) {
            return Ok(());
        }

        debug!("Loading {} tab", tab);
        let result = match tab {
            Tab::Services => self.services.refresh().await,
            Tab::Media => self.media.refresh().await,
            Tab::Quotes => self.quotes.refresh().await,
        };
        result?;
        self.loaded.insert(tab);
        Ok(())
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<(), ApiError> {
        self.ctx.login(form).await?;
        self.show(self.tab).await
    }

    /// Sign out, dropping every panel's list.
    pub fn logout(&mut self) {
        self.ctx.logout();
        self.services.clear();
        self.media.clear();
        self.quotes.clear();
        self.loaded.clear();
        self.tab = Tab::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::{LocalStore, TOKEN_KEY};
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn dashboard(uri: &str, token: Option<&str>) -> Dashboard {
        let store = Arc::new(LocalStore::in_memory());
        if let Some(token) = token {
            store.set(TOKEN_KEY, token).expect("set");
        }
        let config = Config {
            api_origin: uri.to_string(),
            ..Config::default()
        };
        Dashboard::new(Arc::new(AppContext::with_store(config, store)))
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("service".parse::<Tab>().expect("tab"), Tab::Services);
        assert_eq!("Quotes".parse::<Tab>().expect("tab"), Tab::Quotes);
        assert!("users".parse::<Tab>().is_err());
        assert_eq!(Tab::Media.to_string(), "media");
    }

    #[tokio::test]
    async fn test_unauthenticated_shows_login_and_fetches_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let mut dash = dashboard(&server.uri(), None);
        assert_eq!(dash.view(), View::Login);
        assert!(dash.greeting().is_none());

        dash.show(Tab::Quotes).await.expect("no-op");
        assert_eq!(dash.view(), View::Login);
    }

    #[tokio::test]
    async fn test_tab_loads_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "m1"}])))
            .expect(1)
            .mount(&server)
            .await;

        let mut dash = dashboard(&server.uri(), Some("jwt"));
        assert_eq!(dash.view(), View::Panel(Tab::Services));

        dash.show(Tab::Media).await.expect("show");
        dash.show(Tab::Media).await.expect("show again");
        assert_eq!(dash.view(), View::Panel(Tab::Media));
        assert_eq!(dash.media().len(), 1);
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "jwt",
                "user": {"name": "Salma"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"services": [{"_id": "s1"}]})))
            .mount(&server)
            .await;

        let mut dash = dashboard(&server.uri(), None);
        dash.login(&LoginForm::new("salma@rockbridge.sa", "secret1"))
            .await
            .expect("login");

        assert_eq!(dash.view(), View::Panel(Tab::Services));
        assert_eq!(dash.greeting().as_deref(), Some("Welcome, Salma"));
        assert_eq!(dash.services().len(), 1);

        dash.logout();
        assert_eq!(dash.view(), View::Login);
        assert!(dash.services().is_empty());
        assert!(dash.context().store.get(TOKEN_KEY).is_none());
    }
}
