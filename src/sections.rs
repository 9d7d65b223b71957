//! Home page content.
//!
//! Each section reads its texts from the translation bundle and falls back to
//! compiled-in bilingual defaults. The page language is resolved once and
//! shared by every section.

use crate::carousel::{slides_from_bundle, Slide};
use crate::fields::{first_present, present};
use crate::i18n::{resolve_language, Language, ResolvedLanguage, TranslationBundle};
use chrono::{Datelike, Utc};
use serde_json::{Map, Value};

/// English and Arabic default for one text.
type Bilingual = (&'static str, &'static str);

fn pick(default: Bilingual, language: Language) -> &'static str {
    if language == Language::ARABIC {
        default.1
    } else {
        default.0
    }
}

/// Bundle text at `path` unless blank, else the default for `language`.
fn text(bundle: &TranslationBundle, path: &str, default: Bilingual, language: Language) -> String {
    bundle
        .text(path)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| pick(default, language).to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub text: String,
}

/// Cards from the bundle list at `path`; entries without a title are dropped.
/// An absent or fully invalid list yields the defaults.
fn cards(bundle: &TranslationBundle, path: &str, defaults: &[(Bilingual, Bilingual)], language: Language) -> Vec<Card> {
    let from_bundle: Vec<Card> = bundle
        .list(path)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let title = first_present(obj, &["title", "title_en", "title_ar"])?;
            let text = first_present(obj, &["text", "description", "desc"]).unwrap_or_default();
            Some(Card { title, text })
        })
        .collect();

    if !from_bundle.is_empty() {
        return from_bundle;
    }
    defaults
        .iter()
        .map(|(title, text)| Card {
            title: pick(*title, language).to_string(),
            text: pick(*text, language).to_string(),
        })
        .collect()
}

// ==================== Hero ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub tagline: String,
    pub title: String,
    pub cta: String,
    /// Freight mode pills: air, ocean, rail, land
    pub pills: Vec<String>,
    pub slides: Vec<Slide>,
}

const PILLS: &[(&str, Bilingual)] = &[
    ("air", ("Air Freight", "الشحن الجوي")),
    ("ocean", ("Ocean Freight", "الشحن البحري")),
    ("rail", ("Rail Freight", "الشحن بالسكك الحديدية")),
    ("land", ("Land Freight", "الشحن البري")),
];

impl Hero {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let tagline_default = (
            "LOGISTIC CARGO & TRANSPORTATION",
            "الشحن اللوجستي والنقل",
        );
        let tagline = bundle
            .text("hero.tagline")
            .or_else(|| bundle.text("heroTagline"))
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| pick(tagline_default, language).to_string());

        let title_default = (
            "Connecting Your Business To The World Through Reliable Logistics",
            "نربط أعمالك بالعالم من خلال خدمات لوجستية موثوقة",
        );
        let title = bundle
            .text("title")
            .or_else(|| bundle.text("hero.title"))
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| pick(title_default, language).to_string());

        Self {
            tagline,
            title,
            cta: text(bundle, "hero.cta", ("Our Service", "خدماتنا"), language),
            pills: PILLS
                .iter()
                .map(|(key, default)| text(bundle, &format!("servicesPill.{}", key), *default, language))
                .collect(),
            slides: slides_from_bundle(bundle),
        }
    }
}

// ==================== Who Are We ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoAreWe {
    pub heading: String,
    pub company: String,
    pub description: String,
    pub vision_title: String,
    pub vision_text: String,
    pub message_title: String,
    pub message_text: String,
    pub experience_count: String,
    pub experience_label: String,
    pub headquarters_label: String,
    pub headquarters_value: String,
}

impl WhoAreWe {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let t = |key: &str, default: Bilingual| text(bundle, &format!("who.{}", key), default, language);

        let experience_count = bundle
            .text("who.experienceCount")
            .or_else(|| bundle.text("who.experience"))
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "16+".to_string());

        Self {
            heading: t("heading", ("Who are we?", "من نحن؟")),
            company: t(
                "company",
                ("ROCK BRIDGE Import and Export Company", "شركة روك بريدج للاستيراد والتصدير"),
            ),
            description: t(
                "description",
                (
                    "For more than 16 years we have operated at the heart of Chinese and Gulf markets, building bridges between suppliers and importers to simplify trade with the highest levels of efficiency and trust.\n\nWe maintain long-standing relationships with trusted Chinese factories, Saudi and Gulf suppliers and traders, and logistics partners including major carriers to ensure fast execution and smooth operations from origin to final destination.\n\nWe believe our success starts with the success of our clients, so we always deliver innovative, secure sourcing solutions that balance quality, cost and on-time performance.",
                    "منذ أكثر من 16 عامًا نعمل في قلب الأسواق الصينية والخليجية، نبني الجسور بين الموردين والمستوردين لتسهيل حركة التجارة بأعلى درجات الكفاءة والثقة.\n\nنمتلك علاقات وشراكات راسخة مع مصانع صينية موثوقة، وموردين وتجار سعوديين وخليجيين، إلى جانب تعاونات لوجستية مع أبرز شركات الشحن والنقل لضمان سرعة التنفيذ وسلاسة العمليات من المنشأ إلى الوجهة النهائية.\n\nنؤمن أن نجاحنا يبدأ من نجاح عملائنا، لذلك نلتزم دائمًا بتقديم حلول استيراد وتوريد مبتكرة وآمنة، تحقق التوازن المثالي بين الجودة والتكلفة والالتزام بالمواعيد.",
                ),
            ),
            vision_title: t("visionTitle", ("Our Vision", "رؤيتنا")),
            vision_text: t(
                "visionText",
                (
                    "To be the leading provider of commercial mediation and comprehensive sourcing solutions between China and the Gulf, building long-term strategic partnerships grounded in trust, transparency and shared interests to support client growth and market prosperity.",
                    "أن نكون الكيان الرائد في تقديم حلول الوساطة التجارية والتوريد الشامل بين الصين ودول الخليج، من خلال بناء شراكات استراتيجية طويلة الأمد تقوم على الثقة، الشفافية، والمصالح المشتركة، بما يدعم نمو عملائنا وازدهار أسواقنا.",
                ),
            ),
            message_title: t("messageTitle", ("Our Message", "رسالتنا")),
            message_text: t(
                "messageText",
                (
                    "Providing reliable, comprehensive inspection, review and follow-up services to ensure suppliers and products meet the highest international quality and specification standards, delivering a secure, precise and sustainable import experience for every client.",
                    "تقديم خدمات تفتيش ومراجعة ومتابعة موثوقة وشاملة، لضمان التزام المنتجات والموردين بأعلى معايير الجودة والمواصفات الدولية، وتحقيق تجربة استيراد آمنة، دقيقة، ومستدامة لكل عميل نتعامل معه.",
                ),
            ),
            experience_count,
            experience_label: t("experienceLabel", ("Years Experience", "سنوات الخبرة")),
            headquarters_label: t("headquartersLabel", ("Headquarters", "المقر الرئيسي")),
            headquarters_value: t("headquartersValue", ("Saudi Arabia", "المملكة العربية السعودية")),
        }
    }
}

// ==================== Services ====================

/// Heading block above the API-backed services grid, plus static cards shown
/// while the grid has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesIntro {
    pub heading: String,
    pub title: String,
    pub subtitle: String,
    pub fallback_cards: Vec<Card>,
    pub placeholder_images: Vec<String>,
}

const PLACEHOLDER_IMAGE: &str = "/images/im-placeholder.jpg";

const SERVICE_CARD_TEXT: Bilingual = (
    "Professional service to support the process, ensuring compliance, quality and timely delivery.",
    "خدمة احترافية لدعم العملية، تضمن المطابقة والجودة والتسليم في الوقت المحدد.",
);

impl ServicesIntro {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let defaults = [
            (("Tests and Quality Measurement", "الاختبارات وقياس الجودة"), SERVICE_CARD_TEXT),
            (("Production lines and spare parts", "خطوط الإنتاج وقطع الغيار"), SERVICE_CARD_TEXT),
            (("Quotations and Consultations", "عروض الأسعار والاستشارات"), SERVICE_CARD_TEXT),
        ];

        Self {
            heading: text(bundle, "servicesSection.heading", ("Services", "الخدمات"), language),
            title: text(bundle, "servicesSection.title", ("Services We Offer", "الخدمات التي نقدمها"), language),
            subtitle: text(
                bundle,
                "servicesSection.subheading",
                (
                    "We provide a wide range of services to support your business needs.",
                    "نقدم مجموعة واسعة من الخدمات لدعم احتياجات أعمالك.",
                ),
                language,
            ),
            fallback_cards: cards(bundle, "servicesSection.cards", &defaults, language),
            placeholder_images: bundle.strings("servicesSection.placeholderImage").unwrap_or_default(),
        }
    }

    /// Placeholder for grid position `index` when a service has no image.
    pub fn placeholder(&self, index: usize) -> &str {
        self.placeholder_images
            .get(index)
            .map(String::as_str)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

// ==================== How We Work ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: u32,
    pub title: String,
    pub desc: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HowWeWork {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub steps: Vec<Step>,
    pub contact_email: String,
}

const STEPS: &[(&str, Bilingual, Bilingual)] = &[
    (
        "request",
        ("Request a Quote", "طلب عرض سعر"),
        (
            "Send us details about your cargo and requirements.",
            "أرسل لنا تفاصيل البضاعة والمتطلبات الخاصة بك.",
        ),
    ),
    (
        "search",
        ("HS Code Review", "مراجعة HS Code"),
        (
            "We review product HS codes and compliance requirements.",
            "نقوم بمراجعة رموز التعريفة HS ومتطلبات المطابقة.",
        ),
    ),
    (
        "price",
        ("Pricing & Incoterms", "عرض تسعير و إنكوتيرمز"),
        (
            "Receive pricing and recommended Incoterms for your shipment.",
            "استلم عرض الأسعار واقتراحات إنكوتيرمز المناسبة.",
        ),
    ),
    (
        "ship",
        ("Ship / Inspect", "تنفيذ الشحن / الفحص"),
        (
            "We handle shipment execution and inspection as needed.",
            "نتولى تنفيذ الشحن وإجراءات الفحص حسب الحاجة.",
        ),
    ),
    (
        "delivery",
        ("Delivery & Clearance", "التسليم و التخليص"),
        (
            "Final delivery and customs clearance handled end-to-end.",
            "التسليم النهائي والتخليص الجمركي بنهاية الخدمة.",
        ),
    ),
];

const CONTACT_EMAIL: &str = "Window.ksa30@gmail.com";

impl HowWeWork {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let steps: Vec<Step> = bundle
            .list("howWeWork.steps")
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
            .enumerate()
            .filter_map(|(i, obj)| parse_step(i, obj))
            .collect();

        let steps = if steps.is_empty() {
            STEPS
                .iter()
                .enumerate()
                .map(|(i, (icon, title, desc))| Step {
                    id: i as u32 + 1,
                    title: pick(*title, language).to_string(),
                    desc: pick(*desc, language).to_string(),
                    icon: icon.to_string(),
                })
                .collect()
        } else {
            steps
        };

        let contact_email = bundle
            .text("contactEmail")
            .or_else(|| bundle.text("contact.email"))
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| CONTACT_EMAIL.to_string());

        Self {
            title: text(bundle, "howWeWork.title", ("How We Work", "كيف نعمل؟"), language),
            subtitle: text(
                bundle,
                "howWeWork.subtitle",
                (
                    "5 illustrated steps to move your shipments",
                    "5 خطوات مصورة: طلب عرض سعر → مراجعة HS Code → عرض تسعير + إنكوتيرمز → تنفيذ الشحن/الفحص → التسليم/التخليص",
                ),
                language,
            ),
            cta: text(bundle, "howWeWork.cta", ("Request a Quote", "اطلب عرض سعر"), language),
            steps,
            contact_email,
        }
    }
}

fn parse_step(index: usize, obj: &Map<String, Value>) -> Option<Step> {
    let title = present(obj, "title")?;
    let id = obj
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .unwrap_or(index as u32 + 1);
    let icon = present(obj, "icon")
        .or_else(|| STEPS.get(index).map(|(icon, _, _)| icon.to_string()))
        .unwrap_or_default();

    Some(Step {
        id,
        title,
        desc: first_present(obj, &["desc", "text", "description"]).unwrap_or_default(),
        icon,
    })
}

// ==================== Distinguish / Core Values / Tourism ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distinguish {
    pub heading: String,
    pub items: Vec<Card>,
}

impl Distinguish {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let defaults = [
            (
                ("Experience", "الخبرة"),
                (
                    "In-depth knowledge of the technical regulations and regulatory legislation of the target countries.",
                    "معرفة عميقة باللوائح الفنية والتشريعات التنظيمية في الدول المستهدفة.",
                ),
            ),
            (
                ("Speed", "السرعة"),
                (
                    "Reducing waiting time through the ability to complete processes from manufacturing and shipping to the final destination.",
                    "تقليل وقت الانتظار بفضل القدرة على إنجاز العمليات من التصنيع والشحن حتى الوجهة النهائية.",
                ),
            ),
            (
                ("Prices", "الأسعار"),
                (
                    "Competitive pricing and guaranteed quality through a wide network of trusted factories and global markets.",
                    "أسعار تنافسية وجودة مضمونة عبر شبكة واسعة من المصانع الموثوقة والأسواق العالمية.",
                ),
            ),
            (
                ("Compliance", "المطابقة"),
                (
                    "Ensuring products conform to local and governmental requirements and specifications.",
                    "ضمان مطابقة المنتجات للمتطلبات والمواصفات المحلية والحكومية.",
                ),
            ),
            (
                ("Neutrality", "الحياد"),
                (
                    "We are a neutral third party that enhances transparency and credibility in commercial mediation.",
                    "نحن طرف ثالث محايد يعزز الشفافية والمصداقية في الوساطة التجارية.",
                ),
            ),
        ];

        Self {
            heading: text(bundle, "distinguish.heading", ("What Distinguishes Us", "ما يميزنا"), language),
            items: cards(bundle, "distinguish.items", &defaults, language),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreValues {
    pub heading: String,
    pub items: Vec<Card>,
}

impl CoreValues {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let defaults = [
            (
                ("Integrity", "النزاهة"),
                (
                    "We operate with complete transparency and are honest in our dealings.",
                    "نعمل بشفافية كاملة ونلتزم بالصدق في تعاملاتنا.",
                ),
            ),
            (
                ("Accuracy", "الدقة"),
                (
                    "We are meticulous when approving applications to ensure all details are correct and meet specifications.",
                    "نحرص على الدقة عند اعتماد الطلبات لضمان صحة جميع التفاصيل ومطابقتها للمواصفات.",
                ),
            ),
            (
                ("Leadership", "الريادة"),
                (
                    "We keep pace with the latest developments and changes in global trade systems to provide the best solutions.",
                    "نواكب أحدث التطورات والتغيرات في أنظمة التجارة العالمية لتقديم أفضل الحلول.",
                ),
            ),
        ];

        Self {
            heading: text(bundle, "coreValues.heading", ("Core Values", "قيمنا الأساسية"), language),
            items: cards(bundle, "coreValues.items", &defaults, language),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tourism {
    pub heading: String,
    pub title: String,
    pub text: String,
}

impl Tourism {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        Self {
            heading: text(bundle, "tourism.heading", ("Tourism", "السياحة"), language),
            title: text(
                bundle,
                "tourism.title",
                ("A Unique Tourism Experience to China", "تجربة سياحية فريدة إلى الصين"),
                language,
            ),
            text: text(
                bundle,
                "tourism.text",
                (
                    "We arrange business and leisure trips to China, from factory visits and trade fairs to travel and accommodation.",
                    "ننظم رحلات العمل والترفيه إلى الصين، من زيارات المصانع والمعارض التجارية إلى السفر والإقامة.",
                ),
                language,
            ),
        }
    }
}

// ==================== Our Work / WhatsApp ====================

/// Heading block above the API-backed media gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OurWork {
    pub heading: String,
    pub title: String,
    pub subtitle: String,
}

impl OurWork {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        Self {
            heading: text(bundle, "ourWork.heading", ("Our Work", "أعمالنا"), language),
            title: text(bundle, "ourWork.title", ("Recent Work & Media", "معرض الأعمال"), language),
            subtitle: text(
                bundle,
                "ourWork.subtitle",
                (
                    "A small sample of recent projects, images and videos.",
                    "ألقِ نظرة على أحدث مشاريعنا",
                ),
                language,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsApp {
    pub title: String,
    pub description: String,
    pub cta: String,
    pub link: String,
}

const WHATSAPP_NUMBER: &str = "+8613711197481";

impl WhatsApp {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let number = text(bundle, "footer.contact.phone", (WHATSAPP_NUMBER, WHATSAPP_NUMBER), language);
        let digits: String = number.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();

        Self {
            title: text(
                bundle,
                "whatsapp.title",
                ("Contact Us on WhatsApp", "تواصل معنا عبر واتساب"),
                language,
            ),
            description: text(
                bundle,
                "whatsapp.description",
                (
                    "Have questions or need assistance? Chat with our support team on WhatsApp for fast help.",
                    "لديك أسئلة أو تحتاج إلى مساعدة؟ تحدث مع فريق الدعم عبر واتساب للحصول على مساعدة سريعة.",
                ),
                language,
            ),
            cta: text(bundle, "whatsapp.cta", ("Chat on WhatsApp", "تحدث عبر واتساب"), language),
            link: format!("https://wa.me/{}", digits),
        }
    }
}

// ==================== Why Choose Us / Contact CTA ====================

/// A card with an icon key, e.g. `network` or `transit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhyChoose {
    pub heading: String,
    pub title: String,
    pub items: Vec<Feature>,
}

const WHY_ITEMS: &[(&str, Bilingual, Bilingual)] = &[
    (
        "network",
        ("Trusted Factory Network", "شبكة مصانع موثوقة"),
        (
            "Certified factory network in China and the Gulf.",
            "شبكة مصانع معتمدة في الصين والخليج.",
        ),
    ),
    (
        "incoterms",
        ("Clear Customs & Incoterms", "وضوح الجمارك وشروط إنكوتيرمز"),
        (
            "Clear customs estimates and Incoterms before execution.",
            "تقديرات جمركية واضحة وشروط إنكوتيرمز قبل التنفيذ.",
        ),
    ),
    (
        "transit",
        ("Competitive Transit Times", "أوقات شحن تنافسية"),
        (
            "Competitive shipping times with real-time tracking.",
            "أوقات شحن تنافسية مع تتبع لحظي للشحنات.",
        ),
    ),
    (
        "compliance",
        ("Specification Compliance", "الالتزام بالمواصفات"),
        (
            "Commitment to specs, tests and regulatory compliance.",
            "التزام بالمواصفات والاختبارات والمتطلبات التنظيمية.",
        ),
    ),
];

impl WhyChoose {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let items: Vec<Feature> = bundle
            .list("why.items")
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|obj| {
                Some(Feature {
                    icon: first_present(obj, &["key", "icon"]).unwrap_or_default(),
                    title: first_present(obj, &["title", "title_en", "title_ar"])?,
                    text: first_present(obj, &["text", "description", "desc"]).unwrap_or_default(),
                })
            })
            .collect();

        let items = if items.is_empty() {
            WHY_ITEMS
                .iter()
                .map(|(icon, title, text)| Feature {
                    icon: icon.to_string(),
                    title: pick(*title, language).to_string(),
                    text: pick(*text, language).to_string(),
                })
                .collect()
        } else {
            items
        };

        Self {
            heading: text(bundle, "why.heading", ("Why Choose Us", "لماذا تختارنا"), language),
            title: text(
                bundle,
                "why.title",
                (
                    "Ensuring Superior Solutions at ROCK BRIDGE For Optimal Business Performance",
                    "نضمن حلول متميزة من روك بريدج لأداء أعمال مثالي",
                ),
                language,
            ),
            items,
        }
    }
}

/// Call-to-action band linking to the quote request page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCta {
    pub title: String,
    pub subtitle: String,
    pub text: String,
    pub cta: String,
    pub href: &'static str,
    pub mailto: String,
}

/// Route of the public quote request form.
pub const OFFER_PATH: &str = "/get-offer";

impl ContactCta {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let t = |key: &str, default: Bilingual| text(bundle, &format!("contactCTA.{}", key), default, language);

        Self {
            title: t("title", ("Discuss Your Shipping Needs", "ناقش احتياجات الشحن الخاصة بك")),
            subtitle: t("subtitle", ("With Our Experts!", "مع خبرائنا!")),
            text: t(
                "text",
                (
                    "Tell us what you are moving and where it needs to go. Our team will come back with routes, costs and timelines.",
                    "أخبرنا بما تريد شحنه ووجهته، وسيعود إليك فريقنا بالمسارات والتكاليف والمدد الزمنية.",
                ),
            ),
            cta: t("cta", ("Contact Us", "تواصل معنا")),
            href: OFFER_PATH,
            mailto: format!("mailto:{}", CONTACT_EMAIL),
        }
    }
}

// ==================== Header / Newsletter / Footer ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub site_name: String,
    pub nav_contact: String,
    pub mailto: String,
}

impl Header {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        Self {
            site_name: site_name(bundle, language),
            nav_contact: text(bundle, "nav.contact", ("Contact us", "تواصل معنا"), language),
            mailto: format!("mailto:{}", CONTACT_EMAIL),
        }
    }
}

fn site_name(bundle: &TranslationBundle, language: Language) -> String {
    text(bundle, "site.name", ("ROCK BRIDGE", "روك بريدج"), language)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Newsletter {
    pub title: String,
    pub subtitle: String,
    pub placeholder: String,
    pub subscribe: String,
}

impl Newsletter {
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        let t = |key: &str, default: Bilingual| text(bundle, &format!("newsletter.{}", key), default, language);

        Self {
            title: t(
                "title",
                (
                    "Subscribe Our Newsletter To Get The Latest News From Us!",
                    "اشترك في نشرتنا الإخبارية لتصلك آخر أخبارنا!",
                ),
            ),
            subtitle: t(
                "subtitle",
                (
                    "Sign up and stay updated with our latest offers and company news.",
                    "سجّل لتبقى على اطلاع بأحدث عروضنا وأخبار الشركة.",
                ),
            ),
            placeholder: t("placeholder", ("Your Email", "بريدك الإلكتروني")),
            subscribe: t("subscribe", ("Subscribe", "اشترك")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub site_name: String,
    pub about: String,
    pub contact_heading: String,
    pub consultations_label: String,
    pub phone: String,
    pub support_label: String,
    pub email: String,
    pub scan_to_chat: String,
    pub copyright: String,
}

impl Footer {
    /// Resolve with the copyright year taken from the system clock.
    pub fn resolve(bundle: &TranslationBundle, language: Language) -> Self {
        Self::resolve_for_year(bundle, language, Utc::now().year())
    }

    /// Resolve with every `{year}` in the copyright line replaced by `year`.
    pub fn resolve_for_year(bundle: &TranslationBundle, language: Language, year: i32) -> Self {
        let t = |key: &str, default: Bilingual| text(bundle, &format!("footer.{}", key), default, language);

        // `footer` may also be a bare string holding the about text.
        let about = bundle
            .text("footer.about")
            .or_else(|| bundle.text("footer"))
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| {
                pick(
                    (
                        "ROCK BRIDGE - Commercial mediation and export/import solutions tailored for global markets.",
                        "روك بريدج - حلول الوساطة التجارية والاستيراد والتصدير المصممة للأسواق العالمية.",
                    ),
                    language,
                )
                .to_string()
            });

        let copyright = t(
            "copyright",
            (
                "ROCK BRIDGE © {year}. All rights reserved.",
                "روك بريدج © {year}. جميع الحقوق محفوظة.",
            ),
        )
        .replace("{year}", &year.to_string());

        Self {
            site_name: site_name(bundle, language),
            about,
            contact_heading: t("contactHeading", ("Contact Us", "تواصل معنا")),
            consultations_label: t("contact.consultations", ("Consultations", "الاستشارات")),
            phone: t("contact.phone", (WHATSAPP_NUMBER, WHATSAPP_NUMBER)),
            support_label: t("contact.support", ("Support", "الدعم")),
            email: t("contact.email", (CONTACT_EMAIL, CONTACT_EMAIL)),
            scan_to_chat: t("scanToChat", ("Scan to Chat", "امسح للمحادثة")),
            copyright,
        }
    }
}

// ==================== Page ====================

/// Every home page section, resolved in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    pub language: ResolvedLanguage,
    pub header: Header,
    pub hero: Hero,
    pub who: WhoAreWe,
    pub services: ServicesIntro,
    pub how_we_work: HowWeWork,
    pub distinguish: Distinguish,
    pub core_values: CoreValues,
    pub tourism: Tourism,
    pub our_work: OurWork,
    pub whatsapp: WhatsApp,
    pub why: WhyChoose,
    pub contact_cta: ContactCta,
    pub newsletter: Newsletter,
    pub footer: Footer,
}

impl HomePage {
    pub fn resolve(bundle: &TranslationBundle, override_lang: Option<Language>) -> Self {
        let resolved = resolve_language(bundle, override_lang);
        let language = resolved.language;

        Self {
            language: resolved,
            header: Header::resolve(bundle, language),
            hero: Hero::resolve(bundle, language),
            who: WhoAreWe::resolve(bundle, language),
            services: ServicesIntro::resolve(bundle, language),
            how_we_work: HowWeWork::resolve(bundle, language),
            distinguish: Distinguish::resolve(bundle, language),
            core_values: CoreValues::resolve(bundle, language),
            tourism: Tourism::resolve(bundle, language),
            our_work: OurWork::resolve(bundle, language),
            whatsapp: WhatsApp::resolve(bundle, language),
            why: WhyChoose::resolve(bundle, language),
            contact_cta: ContactCta::resolve(bundle, language),
            newsletter: Newsletter::resolve(bundle, language),
            footer: Footer::resolve(bundle, language),
        }
    }
}
