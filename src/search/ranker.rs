use super::fuzzy;
use crate::domain::models::SearchPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Command,
    Client,
    Project,
}

impl Category {
    /// Render order of the result groups.
    pub const ORDER: [Category; 3] = [Category::Command, Category::Client, Category::Project];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Command => "Commands",
            Category::Client => "Clients",
            Category::Project => "Projects",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultItem {
    pub category: Category,
    pub title: String,
    pub subtitle: String,
    pub url: Option<String>,
    pub score: u32,
}

impl SearchResultItem {
    /// URL to navigate to, if the item has a usable one.
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultGroup {
    pub category: Category,
    pub items: Vec<SearchResultItem>,
}

impl ResultGroup {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// One line of the rendered palette list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaletteRow<'a> {
    GroupLabel(&'static str),
    Item {
        flat_index: usize,
        item: &'a SearchResultItem,
    },
}

/// Grouped, ranked palette results.
///
/// All three groups are always present, even when empty, so flat indices
/// are always counted across Commands, Clients, Projects in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResults {
    pub groups: Vec<ResultGroup>,
    pub flat: Vec<SearchResultItem>,
}

impl Default for RankedResults {
    fn default() -> Self {
        Self {
            groups: Category::ORDER
                .iter()
                .map(|&category| ResultGroup {
                    category,
                    items: Vec::new(),
                })
                .collect(),
            flat: Vec::new(),
        }
    }
}

impl RankedResults {
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn get(&self, flat_index: usize) -> Option<&SearchResultItem> {
        self.flat.get(flat_index)
    }

    /// Group labels and items in display order, skipping empty groups.
    pub fn rows(&self) -> Vec<PaletteRow<'_>> {
        let mut rows = Vec::with_capacity(self.flat.len() + self.groups.len());
        let mut flat_index = 0;
        for group in self.groups.iter().filter(|g| !g.items.is_empty()) {
            rows.push(PaletteRow::GroupLabel(group.label()));
            for item in &group.items {
                rows.push(PaletteRow::Item { flat_index, item });
                flat_index += 1;
            }
        }
        rows
    }
}

/// Scores, filters, sorts and groups a search payload for `query`.
#[must_use]
pub fn rank(payload: &SearchPayload, query: &str) -> RankedResults {
    let commands = payload
        .commands
        .iter()
        .flatten()
        .map(|c| {
            candidate(
                Category::Command,
                c.title.clone(),
                "Command".to_string(),
                c.url.clone(),
            )
        });
    let clients = payload.clients.iter().flatten().map(|c| {
        candidate(
            Category::Client,
            c.name.clone(),
            "Client".to_string(),
            c.url.clone(),
        )
    });
    let projects = payload.projects.iter().flatten().map(|p| {
        let client = p.client_name.as_deref().unwrap_or("—");
        candidate(
            Category::Project,
            p.name.clone(),
            format!("Project · {client}"),
            p.url.clone(),
        )
    });

    let groups = vec![
        build_group(Category::Command, commands, query),
        build_group(Category::Client, clients, query),
        build_group(Category::Project, projects, query),
    ];
    let flat = groups.iter().flat_map(|g| g.items.iter().cloned()).collect();

    RankedResults { groups, flat }
}

fn candidate(
    category: Category,
    title: Option<String>,
    subtitle: String,
    url: Option<String>,
) -> SearchResultItem {
    SearchResultItem {
        category,
        title: title.unwrap_or_default(),
        subtitle,
        url,
        score: 0,
    }
}

fn build_group(
    category: Category,
    candidates: impl Iterator<Item = SearchResultItem>,
    query: &str,
) -> ResultGroup {
    let mut items: Vec<SearchResultItem> = candidates
        .map(|mut item| {
            item.score = fuzzy::score(query, &item.title);
            item
        })
        .filter(|item| query.is_empty() || item.score > 0)
        .collect();
    // Stable: equal scores keep server order.
    items.sort_by(|a, b| b.score.cmp(&a.score));
    ResultGroup { category, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ClientHit, CommandHit, ProjectHit};

    fn cmd(title: &str) -> CommandHit {
        CommandHit {
            title: Some(title.to_string()),
            url: Some(format!("/cmd/{title}")),
        }
    }

    fn client(name: &str) -> ClientHit {
        ClientHit {
            name: Some(name.to_string()),
            url: Some(format!("/clients/{name}")),
        }
    }

    fn project(name: &str, client_name: Option<&str>) -> ProjectHit {
        ProjectHit {
            name: Some(name.to_string()),
            url: Some(format!("/projects/{name}")),
            client_name: client_name.map(str::to_string),
        }
    }

    fn payload() -> SearchPayload {
        SearchPayload {
            commands: Some(vec![cmd("New client"), cmd("Open tasks")]),
            clients: Some(vec![client("Acme"), client("Northwind")]),
            projects: Some(vec![
                project("Website relaunch", Some("Acme")),
                project("Ads audit", None),
            ]),
        }
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let ranked = rank(&payload(), "");
        let titles: Vec<_> = ranked.flat.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "New client",
                "Open tasks",
                "Acme",
                "Northwind",
                "Website relaunch",
                "Ads audit"
            ]
        );
        assert!(ranked.flat.iter().all(|i| i.score == 1));
    }

    #[test]
    fn test_non_empty_query_drops_zero_scores() {
        let ranked = rank(&payload(), "ac");
        assert!(ranked.flat.iter().all(|i| i.score > 0));
        let titles: Vec<_> = ranked.flat.iter().map(|i| i.title.as_str()).collect();
        assert!(titles.contains(&"Acme"));
        assert!(!titles.contains(&"Northwind"));
    }

    #[test]
    fn test_group_order_beats_item_score() {
        // "Acme" scores 100 as a client, "Open tasks" only reaches 60 as a
        // command, yet commands still come first.
        let data = SearchPayload {
            commands: Some(vec![cmd("a clear mess")]),
            clients: Some(vec![client("Acme")]),
            projects: None,
        };
        let ranked = rank(&data, "acme");
        assert_eq!(ranked.flat[0].category, Category::Command);
        assert_eq!(ranked.flat[0].score, 60);
        assert_eq!(ranked.flat[1].category, Category::Client);
        assert_eq!(ranked.flat[1].score, 100);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let data = SearchPayload {
            clients: Some(vec![
                client("xx ab one"),
                client("ab first"),
                client("a-b two"),
                client("a_b three"),
            ]),
            ..Default::default()
        };
        let ranked = rank(&data, "ab");
        let titles: Vec<_> = ranked.flat.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["ab first", "xx ab one", "a-b two", "a_b three"]);
    }

    #[test]
    fn test_subtitles() {
        let ranked = rank(&payload(), "");
        assert_eq!(ranked.flat[0].subtitle, "Command");
        assert_eq!(ranked.flat[2].subtitle, "Client");
        assert_eq!(ranked.flat[4].subtitle, "Project · Acme");
        assert_eq!(ranked.flat[5].subtitle, "Project · —");
    }

    #[test]
    fn test_rows_skip_empty_groups_and_number_flat() {
        let data = SearchPayload {
            commands: Some(vec![cmd("Alpha")]),
            clients: Some(vec![]),
            projects: Some(vec![project("Alps", None)]),
        };
        let ranked = rank(&data, "al");
        assert_eq!(ranked.groups.len(), 3);
        let rows = ranked.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], PaletteRow::GroupLabel("Commands"));
        assert!(matches!(rows[1], PaletteRow::Item { flat_index: 0, .. }));
        assert_eq!(rows[2], PaletteRow::GroupLabel("Projects"));
        assert!(matches!(rows[3], PaletteRow::Item { flat_index: 1, .. }));
    }

    #[test]
    fn test_missing_fields_are_safe() {
        let data = SearchPayload {
            commands: Some(vec![CommandHit::default()]),
            ..Default::default()
        };
        let ranked = rank(&data, "");
        assert_eq!(ranked.flat[0].title, "");
        assert_eq!(ranked.flat[0].target(), None);
        assert!(rank(&SearchPayload::default(), "x").is_empty());
    }
}
