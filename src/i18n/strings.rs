/// Built-in UI strings for a language.
///
/// These cover chrome that is not carried by translation bundles: the
/// language toggle, empty/loading states and media labels.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    /// Label shown on the toggle button (the language it switches to)
    pub toggle_label: &'static str,

    /// Accessible label for the toggle button
    pub toggle_aria: &'static str,

    /// Title used for records with no title in any language
    pub untitled: &'static str,

    /// Empty state for the public media gallery
    pub no_items: &'static str,

    /// Empty state for the public services grid
    pub no_services: &'static str,

    /// Loading placeholder
    pub loading: &'static str,

    pub video_label: &'static str,

    pub image_label: &'static str,

    /// Shown when a lightbox item has no resolvable URL
    pub no_preview: &'static str,

    /// Gallery open button
    pub view_label: &'static str,

    /// Fallback notice when the public gallery cannot be fetched
    pub media_load_failed: &'static str,
}

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    toggle_label: "AR",
    toggle_aria: "Toggle language",
    untitled: "Untitled",
    no_items: "No items yet",
    no_services: "No services yet",
    loading: "Loading…",
    video_label: "Video",
    image_label: "Image",
    no_preview: "Preview not available",
    view_label: "View",
    media_load_failed: "Could not load media",
};

pub const ARABIC_STRINGS: LanguageStrings = LanguageStrings {
    toggle_label: "EN",
    toggle_aria: "تبديل اللغة",
    untitled: "بدون عنوان",
    no_items: "لا توجد عناصر بعد",
    no_services: "لا توجد خدمات بعد",
    loading: "جارٍ التحميل…",
    video_label: "فيديو",
    image_label: "صورة",
    no_preview: "معاينة غير متوفرة",
    view_label: "عرض",
    media_load_failed: "تعذر تحميل الوسائط",
};
