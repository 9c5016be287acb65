use std::time::Instant;
use url::{form_urlencoded, Url};

use super::host::{KeyValueStore, NavAction, Navigation, PageHost};
use super::toast::{Toast, ToastBoard};

pub const MERCHANT_ID_KEY: &str = "merchantId";
pub const LOGIN_PAGE: &str = "login.html";
pub const DONATE_LIST_PAGE: &str = "donate-list.html";
pub const EVENT_LIST_PAGE: &str = "event-list.html";
pub const SETTINGS_PAGE: &str = "ecpay-setting.html";
pub const MISSING_MERCHANT_MESSAGE: &str = "Merchant ID is missing, please sign in again";
pub const LOGOUT_PROMPT: &str = "Are you sure you want to log out?";

/// Page-scoped merchant context, alive from a successful resolution until the
/// page is reset or unloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantSession {
    pub merchant_id: String,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PageState {
    Fresh,
    Redirected,
    Ready(MerchantSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Ready,
    RedirectedToLogin,
    AlreadyInitialized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Navigated(Navigation),
    /// Logout prompt was declined.
    Declined,
    /// No merchant id; an error toast was shown instead.
    MissingMerchant,
}

/// Controller for the merchant home page.
#[derive(Debug)]
pub struct IndexPage<H, S> {
    host: H,
    store: S,
    state: PageState,
    toasts: ToastBoard,
}

/// `merchantId` from the query string; an empty value counts as absent.
pub fn merchant_id_from_url(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == MERCHANT_ID_KEY)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Percent-encodes like the browser's `encodeURIComponent`: space becomes
/// `%20` and `!'()*~` are left as is.
pub fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for piece in form_urlencoded::byte_serialize(value.as_bytes()) {
        out.push_str(piece);
    }
    out.replace('+', "%20")
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%7E", "~")
}

/// `page?merchantId=<encoded>`
pub fn page_with_merchant(page: &str, merchant_id: &str) -> String {
    format!("{}?{}={}", page, MERCHANT_ID_KEY, encode_uri_component(merchant_id))
}

fn usable(candidate: Option<String>) -> Option<String> {
    candidate.filter(|id| id != "null" && !id.is_empty())
}

impl<H: PageHost, S: KeyValueStore> IndexPage<H, S> {
    pub fn new(host: H, store: S) -> Self {
        Self {
            host,
            store,
            state: PageState::Fresh,
            toasts: ToastBoard::new(),
        }
    }

    /// Resolves the merchant and prepares the page. Runs once; later calls
    /// are no-ops until [`IndexPage::on_history_navigation`] resets the page.
    pub fn initialize(&mut self, location: &Url) -> InitOutcome {
        if self.state != PageState::Fresh {
            tracing::info!("Index already initialized");
            return InitOutcome::AlreadyInitialized;
        }
        tracing::info!("Initializing index");

        let candidate = merchant_id_from_url(location).or_else(|| self.store.get(MERCHANT_ID_KEY));
        let Some(merchant_id) = usable(candidate) else {
            tracing::error!("No merchant ID found, redirecting to login");
            self.state = PageState::Redirected;
            self.redirect_to_login();
            return InitOutcome::RedirectedToLogin;
        };

        let mut session = MerchantSession {
            merchant_id,
            is_loading: true,
        };
        self.host.show_merchant_id(&session.merchant_id);
        session.is_loading = false;
        self.host.bind_actions(&NavAction::ALL);
        self.store.set(MERCHANT_ID_KEY, &session.merchant_id);
        self.state = PageState::Ready(session);

        tracing::info!("Index initialized successfully");
        InitOutcome::Ready
    }

    pub fn dispatch(&mut self, action: NavAction) -> DispatchOutcome {
        let Some(merchant_id) = self.merchant_id().map(str::to_owned) else {
            tracing::warn!(?action, "Navigation attempted without a merchant ID");
            self.show_error(Toast::error(MISSING_MERCHANT_MESSAGE), Instant::now());
            return DispatchOutcome::MissingMerchant;
        };

        let navigation = match action {
            NavAction::Donate => {
                Navigation::NewContext(page_with_merchant(DONATE_LIST_PAGE, &merchant_id))
            }
            NavAction::Events => {
                Navigation::Replace(page_with_merchant(EVENT_LIST_PAGE, &merchant_id))
            }
            NavAction::Settings => Navigation::Replace(SETTINGS_PAGE.to_string()),
            NavAction::Logout => {
                if !self.host.confirm(LOGOUT_PROMPT) {
                    return DispatchOutcome::Declined;
                }
                self.store.remove(MERCHANT_ID_KEY);
                Navigation::Replace(LOGIN_PAGE.to_string())
            }
        };

        tracing::info!(url = navigation.target(), "Navigating");
        self.host.navigate(navigation.clone());
        DispatchOutcome::Navigated(navigation)
    }

    /// Page became visible or hidden.
    pub fn on_visibility_change(&mut self, visible: bool) {
        if !visible {
            return;
        }
        if let PageState::Ready(session) = &self.state {
            tracing::debug!("Page became visible, refreshing merchant info");
            self.host.show_merchant_id(&session.merchant_id);
        }
    }

    /// Browser back/forward: drop the session and resolve again.
    pub fn on_history_navigation(&mut self, location: &Url) -> InitOutcome {
        tracing::info!("Browser back/forward detected");
        self.state = PageState::Fresh;
        self.initialize(location)
    }

    /// Dismisses every toast whose lifetime has elapsed by `now`. Hosts call
    /// this from their timer.
    pub fn expire_toasts(&mut self, now: Instant) -> usize {
        let expired = self.toasts.prune(now);
        for toast in &expired {
            self.host.dismiss_error(toast);
        }
        expired.len()
    }

    pub fn visible_toasts(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts.visible(now)
    }

    pub fn merchant_id(&self) -> Option<&str> {
        match &self.state {
            PageState::Ready(session) => Some(session.merchant_id.as_str()),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&MerchantSession> {
        match &self.state {
            PageState::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn show_error(&mut self, toast: Toast, now: Instant) {
        self.toasts.push(toast.clone(), now);
        self.host.notify_error(toast);
    }

    fn redirect_to_login(&mut self) {
        tracing::info!("Redirecting to login");
        self.host.navigate(Navigation::Replace(LOGIN_PAGE.to_string()));
    }
}
