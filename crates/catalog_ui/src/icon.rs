//! Centralized icon API rendering the shared stroke glyph set.

use leptos::*;

use crate::primitives::merge_layout_class;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Glyphs available to catalog surfaces.
pub enum IconName {
    /// Downward transfer arrow.
    Download,
    /// Upward transfer arrow.
    Upload,
    /// Edit pencil.
    Pencil,
    /// Delete bin.
    Trash,
    /// Dismiss cross.
    Close,
    /// Left rail-scroll chevron.
    ChevronLeft,
    /// Right rail-scroll chevron.
    ChevronRight,
    /// Handset outline used for app-icon placeholders and the hero badge.
    Smartphone,
    /// Package box.
    Package,
    /// Admin shield.
    Shield,
    /// Sign-in arrow into a door frame.
    LogIn,
    /// Sign-out arrow out of a door frame.
    LogOut,
    /// Home outline.
    Home,
}

impl IconName {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Upload => "upload",
            Self::Pencil => "pencil",
            Self::Trash => "trash",
            Self::Close => "close",
            Self::ChevronLeft => "chevron-left",
            Self::ChevronRight => "chevron-right",
            Self::Smartphone => "smartphone",
            Self::Package => "package",
            Self::Shield => "shield",
            Self::LogIn => "log-in",
            Self::LogOut => "log-out",
            Self::Home => "home",
        }
    }

    fn path_d(self) -> &'static str {
        match self {
            Self::Download => "M12 3v12m0 0l-5-5m5 5l5-5M4 21h16",
            Self::Upload => "M12 21V9m0 0l-5 5m5-5l5 5M4 3h16",
            Self::Pencil => "M17 3l4 4L8 20l-5 1 1-5L17 3z",
            Self::Trash => "M4 7h16M10 7V4h4v3m-8 0l1 13h10l1-13",
            Self::Close => "M6 6l12 12M18 6L6 18",
            Self::ChevronLeft => "M15 5l-7 7 7 7",
            Self::ChevronRight => "M9 5l7 7-7 7",
            Self::Smartphone => {
                "M9 2h6a2 2 0 0 1 2 2v16a2 2 0 0 1-2 2H9a2 2 0 0 1-2-2V4a2 2 0 0 1 2-2zm2 16h2"
            }
            Self::Package => "M21 8l-9-5-9 5v8l9 5 9-5V8zM3 8l9 5 9-5m-9 5v8",
            Self::Shield => "M12 3l8 3v6c0 4.5-3.5 7.8-8 9-4.5-1.2-8-4.5-8-9V6l8-3z",
            Self::LogIn => "M15 3h4a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2h-4M10 17l5-5-5-5m5 5H3",
            Self::LogOut => "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4m7 14l5-5-5-5m5 5H9",
            Self::Home => "M3 10l9-7 9 7v10a1 1 0 0 1-1 1h-5v-7h-6v7H4a1 1 0 0 1-1-1V10z",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Icon sizing tokens.
pub enum IconSize {
    /// Inline/button icon.
    Sm,
    /// Default icon.
    Md,
    /// Feature icon.
    Lg,
}

impl Default for IconSize {
    fn default() -> Self {
        Self::Md
    }
}

impl IconSize {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    fn px(self) -> u32 {
        match self {
            Self::Sm => 14,
            Self::Md => 18,
            Self::Lg => 28,
        }
    }
}

#[component]
/// Shared icon primitive.
pub fn Icon(
    /// Glyph to render.
    icon: IconName,
    #[prop(default = IconSize::Md)] size: IconSize,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    view! {
        <svg
            class=merge_layout_class("ui-icon", layout_class)
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            width=size.px()
            height=size.px()
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="icon"
            data-ui-icon=icon.token()
            data-ui-size=size.token()
        >
            <path d=icon.path_d()></path>
        </svg>
    }
}
