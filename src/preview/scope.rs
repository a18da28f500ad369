//! Live evaluation scope
//!
//! The fixed set of names a generated component may reference without
//! importing them. Built once on first use and never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// What a scope name stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScopeKind {
    /// A UI component (MUI or React built-in)
    Component,
    /// An icon component, registered without its `Icon` suffix
    Icon,
    /// A React hook
    Hook,
    /// Any other value (helpers, the React namespace)
    Value,
}

impl ScopeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScopeKind::Component => "component",
            ScopeKind::Icon => "icon",
            ScopeKind::Hook => "hook",
            ScopeKind::Value => "value",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

const COMPONENTS: &[&str] = &[
    "Accordion",
    "AccordionActions",
    "AccordionDetails",
    "AccordionSummary",
    "Alert",
    "AlertTitle",
    "AppBar",
    "Autocomplete",
    "Avatar",
    "AvatarGroup",
    "Backdrop",
    "Badge",
    "BottomNavigation",
    "BottomNavigationAction",
    "Box",
    "Breadcrumbs",
    "Button",
    "ButtonBase",
    "ButtonGroup",
    "Card",
    "CardActionArea",
    "CardActions",
    "CardContent",
    "CardHeader",
    "CardMedia",
    "Checkbox",
    "Chip",
    "CircularProgress",
    "Collapse",
    "Container",
    "CssBaseline",
    "Dialog",
    "DialogActions",
    "DialogContent",
    "DialogContentText",
    "DialogTitle",
    "Divider",
    "Drawer",
    "Fab",
    "Fade",
    "FilledInput",
    "FormControl",
    "FormControlLabel",
    "FormGroup",
    "FormHelperText",
    "FormLabel",
    "Fragment",
    "Grid",
    "Grow",
    "Icon",
    "IconButton",
    "ImageList",
    "ImageListItem",
    "ImageListItemBar",
    "Input",
    "InputAdornment",
    "InputBase",
    "InputLabel",
    "LinearProgress",
    "Link",
    "List",
    "ListItem",
    "ListItemAvatar",
    "ListItemButton",
    "ListItemIcon",
    "ListItemSecondaryAction",
    "ListItemText",
    "ListSubheader",
    "Menu",
    "MenuItem",
    "MenuList",
    "Modal",
    "NativeSelect",
    "OutlinedInput",
    "Pagination",
    "Paper",
    "Popover",
    "Popper",
    "Radio",
    "RadioGroup",
    "Rating",
    "Select",
    "Skeleton",
    "Slide",
    "Slider",
    "Snackbar",
    "SpeedDial",
    "SpeedDialAction",
    "SpeedDialIcon",
    "Stack",
    "Step",
    "StepButton",
    "StepConnector",
    "StepContent",
    "StepIcon",
    "StepLabel",
    "Stepper",
    "SvgIcon",
    "Switch",
    "Tab",
    "Table",
    "TableBody",
    "TableCell",
    "TableContainer",
    "TableFooter",
    "TableHead",
    "TablePagination",
    "TableRow",
    "TableSortLabel",
    "Tabs",
    "TextField",
    "ThemeProvider",
    "ToggleButton",
    "ToggleButtonGroup",
    "Toolbar",
    "Tooltip",
    "Typography",
    "Zoom",
];

// Icons whose bare name collides with a component above are registered under
// their full `...Icon` name instead (see the tail of this list).
const ICONS: &[&str] = &[
    "AccountCircle",
    "Add",
    "ArrowBack",
    "ArrowDownward",
    "ArrowForward",
    "ArrowUpward",
    "AttachMoney",
    "CalendarToday",
    "Check",
    "CheckCircle",
    "ChevronLeft",
    "ChevronRight",
    "Close",
    "CloudUpload",
    "ContentCopy",
    "CreditCard",
    "Dashboard",
    "Delete",
    "Download",
    "Edit",
    "Email",
    "ExpandLess",
    "ExpandMore",
    "Favorite",
    "FavoriteBorder",
    "FilterList",
    "Home",
    "Info",
    "Lock",
    "Logout",
    "MoreVert",
    "Notifications",
    "Person",
    "Phone",
    "Refresh",
    "Remove",
    "Save",
    "Search",
    "Send",
    "Settings",
    "Share",
    "ShoppingCart",
    "Star",
    "StarBorder",
    "TrendingDown",
    "TrendingUp",
    "Upload",
    "Visibility",
    "VisibilityOff",
    "Warning",
    "LinkIcon",
    "ListIcon",
    "MenuIcon",
];

const HOOKS: &[&str] = &[
    "useCallback",
    "useContext",
    "useEffect",
    "useMemo",
    "useReducer",
    "useRef",
    "useState",
    "useTheme",
];

const VALUES: &[&str] = &["React", "alpha", "createTheme", "keyframes", "styled"];

static LIVE_SCOPE: LazyLock<Scope> = LazyLock::new(|| {
    let mut scope = Scope::empty();
    scope.extend(COMPONENTS, ScopeKind::Component);
    scope.extend(ICONS, ScopeKind::Icon);
    scope.extend(HOOKS, ScopeKind::Hook);
    scope.extend(VALUES, ScopeKind::Value);
    scope
});

/// Immutable mapping from identifier to what it resolves to
#[derive(Debug, Clone, Default)]
pub struct Scope {
    entries: BTreeMap<String, ScopeKind>,
}

impl Scope {
    /// The process-wide scope used by the previewer
    pub fn live() -> &'static Scope {
        &LIVE_SCOPE
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a scope from explicit entries
    #[cfg(test)]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, ScopeKind)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, kind)| (name.to_string(), kind))
                .collect(),
        }
    }

    fn extend(&mut self, names: &[&str], kind: ScopeKind) {
        for name in names {
            self.entries.insert((*name).to_string(), kind);
        }
    }

    pub fn get(&self, name: &str) -> Option<ScopeKind> {
        self.entries.get(name).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether `<{stem}Icon>` must keep its suffix.
    ///
    /// True when the bare stem already names a non-icon entry (stripping would
    /// silently swap the icon for that component) or when the full name is
    /// itself a component such as `ListItemIcon`.
    pub fn keeps_icon_suffix(&self, stem: &str) -> bool {
        let stem_taken = matches!(self.get(stem), Some(kind) if kind != ScopeKind::Icon);
        let full_is_component =
            self.get(&format!("{}Icon", stem)) == Some(ScopeKind::Component);
        stem_taken || full_is_component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_scope_kinds() {
        let scope = Scope::live();
        assert_eq!(scope.get("Button"), Some(ScopeKind::Component));
        assert_eq!(scope.get("Settings"), Some(ScopeKind::Icon));
        assert_eq!(scope.get("useState"), Some(ScopeKind::Hook));
        assert_eq!(scope.get("React"), Some(ScopeKind::Value));
        assert_eq!(scope.get("SettingsIcon"), None);
    }

    #[test]
    fn test_colliding_icons_keep_suffix() {
        let scope = Scope::live();
        assert!(scope.keeps_icon_suffix("List"));
        assert!(scope.keeps_icon_suffix("Menu"));
        assert!(scope.keeps_icon_suffix("ListItem"));
        assert!(scope.keeps_icon_suffix("Svg"));
        assert!(!scope.keeps_icon_suffix("Settings"));
        assert!(!scope.keeps_icon_suffix("ShoppingCart"));
        assert_eq!(scope.get("ListIcon"), Some(ScopeKind::Icon));
    }

    #[test]
    fn test_custom_scope() {
        let scope = Scope::from_entries([("Panel", ScopeKind::Component)]);
        assert_eq!(scope.len(), 1);
        assert!(scope.keeps_icon_suffix("Panel"));
        assert!(!scope.keeps_icon_suffix("Gear"));
    }
}
