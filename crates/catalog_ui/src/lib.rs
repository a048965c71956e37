//! Shared UI primitive library for the catalog's public and admin surfaces.
//!
//! The crate owns reusable Leptos primitives, a centralized icon API, and the
//! stable `data-ui-*` DOM contract consumed by the site CSS layers. Pages
//! compose these primitives instead of emitting ad hoc control markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Badge, Button, ButtonSize, ButtonVariant, Card, Cluster, Elevation, EmptyState, FieldGroup,
    FieldVariant, FileField, Grid, Heading, IconButton, LayoutAlign, LayoutGap, LayoutJustify,
    LayoutPadding, Modal, Panel, Rail, Spinner, Stack, SurfaceVariant, Text, TextArea, TextField,
    TextRole, TextTone, Toast,
};

/// Convenience imports for crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        Badge, Button, ButtonSize, ButtonVariant, Card, Cluster, Elevation, EmptyState, FieldGroup,
        FieldVariant, FileField, Grid, Heading, Icon, IconButton, IconName, IconSize, LayoutAlign,
        LayoutGap, LayoutJustify, LayoutPadding, Modal, Panel, Rail, Spinner, Stack,
        SurfaceVariant, Text, TextArea, TextField, TextRole, TextTone, Toast,
    };
}
