use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rock_bridge::api::{ApiError, Attachment, Quotes, Resource};
use rock_bridge::auth::{self, LoginForm, ResetForm};
use rock_bridge::carousel::{CarouselDriver, Timing};
use rock_bridge::config::Config;
use rock_bridge::contact::QuoteRequest;
use rock_bridge::dashboard::{Dashboard, Tab, View};
use rock_bridge::forms::{MediaForm, ServiceForm};
use rock_bridge::i18n::{BundleLoader, BundleSource, Language};
use rock_bridge::notify::Notifications;
use rock_bridge::panel::Panel;
use rock_bridge::record::Record;
use rock_bridge::sections::HomePage;
use rock_bridge::session::AppContext;
use rock_bridge::showcase::{self, Gallery, ServicesGrid};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Rock Bridge site content and admin dashboard client
#[derive(Parser)]
#[command(name = "rock-bridge")]
#[command(about = "Bilingual site content and admin dashboard for Rock Bridge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the home page sections in the active language
    Content {
        /// Force a language (en or ar) instead of the saved preference
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Show, set or toggle the saved site language
    Lang {
        /// "en", "ar" or "toggle"; omit to show the current language
        value: Option<String>,
    },
    /// Play the hero carousel for a while, printing each frame change
    Carousel {
        #[arg(short, long, default_value_t = 10)]
        seconds: u64,
    },
    /// Sign in to the dashboard
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Request a password reset code
    Forgot {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with the emailed code
    Reset {
        #[arg(short, long)]
        email: String,
        /// Reset link path, e.g. /resetpassword/482913
        #[arg(long, conflicts_with = "otp")]
        link: Option<String>,
        #[arg(long)]
        otp: Option<String>,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        confirm: String,
    },
    /// Manage services
    Services {
        #[command(subcommand)]
        action: ServiceAction,
    },
    /// Manage gallery media
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
    /// Review quote requests
    Quotes {
        #[command(subcommand)]
        action: QuoteAction,
    },
    /// Send a quote request from the public contact form
    Offer {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        phone: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum ServiceAction {
    List,
    Add {
        #[arg(long)]
        title_en: String,
        #[arg(long)]
        title_ar: String,
        #[arg(long)]
        description_en: String,
        #[arg(long)]
        description_ar: String,
        #[arg(long)]
        image: PathBuf,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum MediaAction {
    List,
    Add {
        #[arg(long, default_value = "")]
        title_en: String,
        #[arg(long, default_value = "")]
        title_ar: String,
        #[arg(long, default_value = "")]
        description_en: String,
        #[arg(long, default_value = "")]
        description_ar: String,
        #[arg(long)]
        file: PathBuf,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum QuoteAction {
    List,
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("rock_bridge=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let ctx = Arc::new(AppContext::open(config)?);

    let result = run(cli.command, Arc::clone(&ctx)).await;
    print_notices(&ctx.notices);
    result
}

async fn run(command: Commands, ctx: Arc<AppContext>) -> Result<()> {
    match command {
        Commands::Content { lang } => {
            let language = match lang.as_deref() {
                Some(code) => Language::from_code(code)?,
                None => current_language(&ctx),
            };

            let loader = BundleLoader::new(BundleSource::from_config(&ctx.config), reqwest::Client::new());
            let bundle = loader.load(language).await;
            // The saved preference is as explicit as --lang; bundle sniffing never overrides it.
            let page = HomePage::resolve(&bundle, Some(language));
            let (services, gallery) = tokio::join!(
                showcase::load_services(&ctx.client, &page.services, language, &ctx.notices),
                showcase::load_gallery(&ctx.client, language, &ctx.notices),
            );
            print_page(&page, &services, &gallery);
        }
        Commands::Lang { value } => {
            let mut pref = ctx.language.lock().unwrap_or_else(|e| e.into_inner());
            match value.as_deref() {
                None => {}
                Some("toggle") => {
                    pref.toggle()?;
                }
                Some(code) => pref.set(Language::from_code(code)?)?,
            }
            let attrs = pref.document_attributes();
            println!(
                "lang={} dir={} ({}: {})",
                attrs.lang,
                attrs.dir.as_str(),
                pref.toggle_aria(),
                pref.toggle_label()
            );
        }
        Commands::Carousel { seconds } => play_carousel(&ctx, Duration::from_secs(seconds)).await?,
        Commands::Login { email, password } => {
            let mut dash = Dashboard::new(ctx);
            dash.login(&LoginForm::new(email, password)).await?;
            if let Some(greeting) = dash.greeting() {
                println!("{}", greeting);
            }
        }
        Commands::Logout => ctx.logout(),
        Commands::Forgot { email } => {
            match auth::forgot_password(&ctx.client, &email).await {
                Ok(message) => ctx.notices.success(message),
                Err(e) => {
                    ctx.notices.error(e.user_message(auth::RESET_REQUEST_FAILED));
                    return Err(e.into());
                }
            }
        }
        Commands::Reset {
            email,
            link,
            otp,
            password,
            confirm,
        } => {
            let mut form = link.as_deref().map(ResetForm::with_otp_from_path).unwrap_or_default();
            if let Some(otp) = otp {
                form.otp = otp;
            }
            form.email = email;
            form.new_password = password;
            form.confirm_password = confirm;

            match auth::reset_password(&ctx.client, &form).await {
                Ok(message) => ctx.notices.success(message),
                Err(errors) => {
                    ctx.notices.error(errors.to_string());
                    return Err(errors.into());
                }
            }
        }
        Commands::Services { action } => {
            let dash = open_tab(ctx, Tab::Services).await?;
            let language = current_language(dash.context());
            match action {
                ServiceAction::List => list(dash.services(), language, &dash.context().config.api_origin),
                ServiceAction::Add {
                    title_en,
                    title_ar,
                    description_en,
                    description_ar,
                    image,
                } => {
                    let mut form = ServiceForm {
                        title_en,
                        title_ar,
                        description_en,
                        description_ar,
                        image: None,
                    };
                    form.attach(Attachment::from_path(&image).await?)?;
                    with_progress(dash.services(), dash.services().create(&mut form)).await?;
                }
                ServiceAction::Delete { id } => delete(dash.services(), &id).await?,
            }
        }
        Commands::Media { action } => {
            let dash = open_tab(ctx, Tab::Media).await?;
            let language = current_language(dash.context());
            match action {
                MediaAction::List => list(dash.media(), language, &dash.context().config.api_origin),
                MediaAction::Add {
                    title_en,
                    title_ar,
                    description_en,
                    description_ar,
                    file,
                } => {
                    let mut form = MediaForm {
                        title_en,
                        title_ar,
                        description_en,
                        description_ar,
                        file: None,
                    };
                    form.attach(Attachment::from_path(&file).await?)?;
                    with_progress(dash.media(), dash.media().create(&mut form)).await?;
                }
                MediaAction::Delete { id } => delete(dash.media(), &id).await?,
            }
        }
        Commands::Quotes { action } => {
            let dash = open_tab(ctx, Tab::Quotes).await?;
            match action {
                QuoteAction::List => {
                    for quote in dash.quotes().items() {
                        let field = |key: &str| quote.field(key).unwrap_or_default();
                        println!(
                            "{}  {} <{}> {}\n    {}",
                            quote.id().unwrap_or_default(),
                            field("name"),
                            field("email"),
                            field("phone"),
                            field("message"),
                        );
                    }
                }
                QuoteAction::Delete { id } => delete(dash.quotes(), &id).await?,
            }
        }
        Commands::Offer {
            name,
            phone,
            email,
            message,
        } => {
            let request = QuoteRequest {
                name,
                phone,
                email,
                message,
            };
            match request.submit(&ctx.client).await {
                Ok(message) => ctx.notices.success(message),
                Err(e) => {
                    ctx.notices
                        .error(e.user_message(Quotes::MESSAGES.create_failed));
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}

fn current_language(ctx: &AppContext) -> Language {
    ctx.language.lock().unwrap_or_else(|e| e.into_inner()).current()
}

/// A dashboard showing `tab`, or an error when nobody is signed in.
async fn open_tab(ctx: Arc<AppContext>, tab: Tab) -> Result<Dashboard> {
    let mut dash = Dashboard::new(ctx);
    if dash.view() == View::Login {
        anyhow::bail!("Not logged in. Run `rock-bridge login` first");
    }
    dash.show(tab).await?;
    Ok(dash)
}

fn list<R: Resource>(panel: &Panel<R>, language: Language, origin: &str) {
    let items = panel.items();
    if items.is_empty() {
        println!("No {} yet", R::LIST_ENVELOPE);
        return;
    }
    for item in items {
        print_record(&item, language, origin);
    }
}

fn print_record(record: &Record, language: Language, origin: &str) {
    let url = Some(record.media_url(origin))
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| record.image_url(origin));
    println!(
        "{}  {}{}",
        record.id().unwrap_or_default(),
        record.display_title(language),
        if record.is_video() { " [video]" } else { "" },
    );
    let description = record.description(language);
    if !description.is_empty() {
        println!("    {}", description);
    }
    if !url.is_empty() {
        println!("    {}", url);
    }
}

async fn delete<R: Resource>(panel: &Panel<R>, id: &str) -> Result<()> {
    if !panel.request_delete(id) {
        anyhow::bail!("No {} with id {}", R::LABEL, id);
    }
    panel.confirm_delete().await?;
    Ok(())
}

/// Run an upload while echoing its progress to stderr.
async fn with_progress<R, F>(panel: &Panel<R>, upload: F) -> Result<()>
where
    R: Resource,
    F: std::future::Future<Output = Result<(), ApiError>>,
{
    let mut progress = panel.upload_progress();
    let reporter = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let percent = *progress.borrow_and_update();
            eprint!("\rUploading... {:>3}%", percent);
        }
    });

    let result = upload.await;
    reporter.abort();
    eprintln!();
    result.context("Upload failed")
}

async fn play_carousel(ctx: &AppContext, run_for: Duration) -> Result<()> {
    let language = current_language(ctx);
    let loader = BundleLoader::new(BundleSource::from_config(&ctx.config), reqwest::Client::new());
    let bundle = loader.load(language).await;
    let page = HomePage::resolve(&bundle, Some(language));

    let timing = Timing::new(
        Duration::from_millis(ctx.config.carousel_tick_ms),
        Duration::from_millis(ctx.config.carousel_duration_ms),
    );
    let slides = page.hero.slides.clone();
    let driver = CarouselDriver::start(slides.clone(), timing);
    let mut views = driver.subscribe();
    info!("Playing {} slides for {:?}", slides.len(), run_for);

    let deadline = tokio::time::sleep(run_for);
    tokio::pin!(deadline);
    let mut shown = usize::MAX;
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = *views.borrow_and_update();
                if view.index != shown {
                    shown = view.index;
                    if let Some(slide) = slides.get(view.index) {
                        println!("[{}/{}] {}", view.index + 1, view.len, slide.title.get(language));
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_page(page: &HomePage, services: &ServicesGrid, gallery: &Gallery) {
    println!("lang={} dir={}", page.language.language.code(), page.language.direction().as_str());
    println!("{}  [{}] {}", page.header.site_name, page.header.nav_contact, page.header.mailto);
    println!();
    println!("{}", page.hero.tagline);
    println!("{}", page.hero.title);
    println!("[{}]  {}", page.hero.cta, page.hero.pills.join(" | "));
    println!();
    println!("== {} ==", page.who.heading);
    println!("{}", page.who.company);
    println!("{}", page.who.description);
    println!("{}: {}", page.who.vision_title, page.who.vision_text);
    println!("{}: {}", page.who.message_title, page.who.message_text);
    println!("{} {}", page.who.experience_count, page.who.experience_label);
    println!("{}: {}", page.who.headquarters_label, page.who.headquarters_value);
    println!();
    println!("== {} ==", page.services.heading);
    println!("{}", page.services.title);
    println!("{}", page.services.subtitle);
    if let Some(empty) = services.empty_text() {
        println!("  {}", empty);
    }
    for card in &services.cards {
        println!("  * {} ({})", card.title, card.image);
        if !card.description.is_empty() {
            println!("    {}", card.description);
        }
    }
    println!();
    println!("== {} ==", page.how_we_work.title);
    println!("{}", page.how_we_work.subtitle);
    for step in &page.how_we_work.steps {
        println!("  {}. {} - {}", step.id, step.title, step.desc);
    }
    println!("[{}] {}", page.how_we_work.cta, page.how_we_work.contact_email);
    println!();
    println!("== {} ==", page.distinguish.heading);
    for item in &page.distinguish.items {
        println!("  {}: {}", item.title, item.text);
    }
    println!("== {} ==", page.core_values.heading);
    for item in &page.core_values.items {
        println!("  {}: {}", item.title, item.text);
    }
    println!();
    println!("== {} ==", page.tourism.heading);
    println!("{}\n{}", page.tourism.title, page.tourism.text);
    println!();
    println!("== {} ==", page.our_work.heading);
    println!("{}\n{}", page.our_work.title, page.our_work.subtitle);
    if let Some(empty) = gallery.empty_text() {
        println!("  {}", empty);
    }
    for item in &gallery.items {
        println!("  [{}] {} -> {}", item.label, item.title, item.preview(gallery.language));
        if !item.description.is_empty() {
            println!("    {}", item.description);
        }
    }
    println!();
    println!("{}: {} ({})", page.whatsapp.title, page.whatsapp.cta, page.whatsapp.link);
    println!();
    println!("== {} ==", page.why.heading);
    println!("{}", page.why.title);
    for item in &page.why.items {
        println!("  {}: {}", item.title, item.text);
    }
    println!();
    println!("{} {}", page.contact_cta.title, page.contact_cta.subtitle);
    println!("{}", page.contact_cta.text);
    println!("[{}] {}", page.contact_cta.cta, page.contact_cta.href);
    println!();
    println!("{}\n{}", page.newsletter.title, page.newsletter.subtitle);
    println!("[{}] [{}]", page.newsletter.placeholder, page.newsletter.subscribe);
    println!();
    println!("{}\n{}", page.footer.site_name, page.footer.about);
    println!("{}", page.footer.contact_heading);
    println!("  {}: {}", page.footer.consultations_label, page.footer.phone);
    println!("  {}: {}", page.footer.support_label, page.footer.email);
    println!("{}", page.footer.scan_to_chat);
    println!("{}", page.footer.copyright);
}

fn print_notices(notices: &Notifications) {
    for notice in notices.drain() {
        if notice.is_error() {
            eprintln!("error: {}", notice.message);
        } else {
            println!("{}", notice.message);
        }
    }
}
