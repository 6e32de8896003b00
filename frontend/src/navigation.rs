//! 导航菜单
//!
//! 根据当前用户角色计算侧边栏与底部导航的条目。纯逻辑，不依赖 DOM。

use crate::web::route::AppRoute;
use multipanel_shared::{Role, UserRecord};

/// 图标引用，由视图层映射为具体 SVG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Home,
    Search,
    GenerateKeys,
    Transactions,
    Reset,
    People,
    Upload,
    Providers,
    Inventory,
    Bonus,
    Referral,
    Password,
    Menu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub icon: NavIcon,
    pub route: AppRoute,
}

impl NavEntry {
    fn new(label: &'static str, icon: NavIcon, route: AppRoute) -> Self {
        Self { label, icon, route }
    }

    pub fn path(&self) -> String {
        self.route.to_path()
    }
}

/// 主导航：对所有已登录角色相同
pub fn primary_entries() -> Vec<NavEntry> {
    vec![
        NavEntry::new("Home", NavIcon::Home, AppRoute::Dashboard),
        NavEntry::new("My Keys", NavIcon::Search, AppRoute::Keys),
        NavEntry::new("Generate Keys", NavIcon::GenerateKeys, AppRoute::GenerateKeys),
        NavEntry::new("Transactions", NavIcon::Transactions, AppRoute::Transactions),
        NavEntry::new("Reset Key", NavIcon::Reset, AppRoute::ResetKey),
    ]
}

/// 管理菜单，按角色精确匹配
///
/// 角色缺失或未知时退化为与 reseller 相同的最小菜单。
pub fn management_entries(role: Option<Role>) -> Vec<NavEntry> {
    let change_password = || {
        NavEntry::new(
            "Change Password",
            NavIcon::Password,
            AppRoute::ChangePassword,
        )
    };
    let users = || NavEntry::new("Users", NavIcon::People, AppRoute::Users);
    let create_referral = || {
        NavEntry::new(
            "Create Referral",
            NavIcon::Referral,
            AppRoute::CreateReferral,
        )
    };

    match role {
        Some(Role::Owner) => vec![
            users(),
            NavEntry::new("Upload Key", NavIcon::Upload, AppRoute::UploadKeys),
            NavEntry::new(
                "Providers & Plans",
                NavIcon::Providers,
                AppRoute::ProviderPlans,
            ),
            NavEntry::new("Unsold Keys", NavIcon::Inventory, AppRoute::UnsoldKeys),
            NavEntry::new("Bonus List", NavIcon::Bonus, AppRoute::BonusList),
            create_referral(),
            change_password(),
        ],
        Some(Role::Admin) => vec![
            users(),
            NavEntry::new("My Bonus", NavIcon::Bonus, AppRoute::MyBonus),
            create_referral(),
            change_password(),
        ],
        Some(Role::Reseller) | Some(Role::User) | Some(Role::Unknown) | None => {
            vec![change_password()]
        }
    }
}

/// 侧边栏菜单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    pub primary: Vec<NavEntry>,
    pub management: Vec<NavEntry>,
}

impl NavMenu {
    pub fn for_user(user: Option<&UserRecord>) -> Self {
        Self {
            primary: primary_entries(),
            management: management_entries(user.and_then(UserRecord::role)),
        }
    }

    pub fn show_management(&self) -> bool {
        !self.management.is_empty()
    }
}

/// 当前路径是否选中该条目（自身或其子路径）
pub fn is_selected(current_path: &str, entry_path: &str) -> bool {
    current_path == entry_path
        || current_path
            .strip_prefix(entry_path)
            .is_some_and(|rest| rest.starts_with('/'))
}

// =========================================================
// 底部导航（移动端）
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BottomAction {
    Navigate(AppRoute),
    /// 打开侧边栏
    OpenMenu,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottomEntry {
    pub label: &'static str,
    pub icon: NavIcon,
    pub action: BottomAction,
}

pub fn bottom_entries() -> Vec<BottomEntry> {
    vec![
        BottomEntry {
            label: "Home",
            icon: NavIcon::Home,
            action: BottomAction::Navigate(AppRoute::Dashboard),
        },
        BottomEntry {
            label: "Keys",
            icon: NavIcon::Search,
            action: BottomAction::Navigate(AppRoute::Keys),
        },
        BottomEntry {
            label: "Generate",
            icon: NavIcon::GenerateKeys,
            action: BottomAction::Navigate(AppRoute::GenerateKeys),
        },
        BottomEntry {
            label: "Menu",
            icon: NavIcon::Menu,
            action: BottomAction::OpenMenu,
        },
    ]
}

/// 高亮的底部导航下标：第一个作为前缀匹配的导航路径
pub fn bottom_nav_index(current_path: &str) -> Option<usize> {
    bottom_entries()
        .iter()
        .position(|entry| match &entry.action {
            BottomAction::Navigate(route) => current_path.starts_with(route.to_path().as_str()),
            BottomAction::OpenMenu => false,
        })
}
