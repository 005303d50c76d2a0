pub struct FooterItem {
    pub key: &'static str,
    pub desc: &'static str,
    /// Longer label shown in Easy Mode.
    pub label: &'static str,
    pub highlighted: bool,
}

impl FooterItem {
    pub const fn new(key: &'static str, desc: &'static str, label: &'static str) -> Self {
        Self {
            key,
            desc,
            label,
            highlighted: false,
        }
    }
}

pub struct FooterGroup {
    pub name: &'static str,
    pub items: Vec<FooterItem>,
}
