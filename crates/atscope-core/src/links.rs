use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Human-facing link to a record on a third-party site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// Name of the site (`Bluesky`, `WhiteWind`, ...).
    pub label: String,
    /// Absolute URL of the record on that site.
    pub link: String,
}

/// Builds the external link for a coordinate; `None` when a needed part is missing.
pub type TemplateFn = fn(&Coordinate) -> Option<ExternalLink>;

/// One row of the template table.
#[derive(Debug, Clone, Copy)]
pub struct LinkTemplateEntry {
    /// Collection NSID, matched exactly.
    pub collection: &'static str,
    /// Link builder for records of that collection.
    pub template: TemplateFn,
}

fn link(label: &str, link: String) -> Option<ExternalLink> {
    Some(ExternalLink {
        label: label.to_string(),
        link,
    })
}

fn rkey(c: &Coordinate) -> Option<&str> {
    c.rkey.as_ref().map(|r| r.as_str())
}

fn bsky_profile(c: &Coordinate) -> Option<ExternalLink> {
    link("Bluesky", format!("https://bsky.app/profile/{}", c.authority))
}

fn bsky_post(c: &Coordinate) -> Option<ExternalLink> {
    let rkey = rkey(c)?;
    link("Bluesky", format!("https://bsky.app/profile/{}/post/{}", c.authority, rkey))
}

fn bsky_list(c: &Coordinate) -> Option<ExternalLink> {
    let rkey = rkey(c)?;
    link("Bluesky", format!("https://bsky.app/profile/{}/lists/{}", c.authority, rkey))
}

fn bsky_feed(c: &Coordinate) -> Option<ExternalLink> {
    let rkey = rkey(c)?;
    link("Bluesky", format!("https://bsky.app/profile/{}/feed/{}", c.authority, rkey))
}

fn frontpage_post(c: &Coordinate) -> Option<ExternalLink> {
    let rkey = rkey(c)?;
    link("Frontpage", format!("https://frontpage.fyi/post/{}/{}", c.authority, rkey))
}

fn whitewind_entry(c: &Coordinate) -> Option<ExternalLink> {
    let rkey = rkey(c)?;
    link("WhiteWind", format!("https://whtwnd.com/{}/{}", c.authority, rkey))
}

fn pinksea_oekaki(c: &Coordinate) -> Option<ExternalLink> {
    let rkey = rkey(c)?;
    link("PinkSea", format!("https://pinksea.art/{}/oekaki/{}", c.authority, rkey))
}

fn linkat_board(c: &Coordinate) -> Option<ExternalLink> {
    link("Linkat", format!("https://linkat.blue/{}", c.authority))
}

const TEMPLATES: &[LinkTemplateEntry] = &[
    LinkTemplateEntry {
        collection: "app.bsky.actor.profile",
        template: bsky_profile,
    },
    LinkTemplateEntry {
        collection: "app.bsky.feed.post",
        template: bsky_post,
    },
    LinkTemplateEntry {
        collection: "app.bsky.graph.list",
        template: bsky_list,
    },
    LinkTemplateEntry {
        collection: "app.bsky.feed.generator",
        template: bsky_feed,
    },
    LinkTemplateEntry {
        collection: "fyi.unravel.frontpage.post",
        template: frontpage_post,
    },
    LinkTemplateEntry {
        collection: "com.whtwnd.blog.entry",
        template: whitewind_entry,
    },
    LinkTemplateEntry {
        collection: "com.shinolabs.pinksea.oekaki",
        template: pinksea_oekaki,
    },
    LinkTemplateEntry {
        collection: "blue.linkat.board",
        template: linkat_board,
    },
];

/// Static table of deep-link templates keyed by collection.
///
/// Lookup is an exact key match. An unlisted collection has no external
/// link, which is not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTemplateRegistry;

impl LinkTemplateRegistry {
    /// Returns the registry.
    pub fn new() -> Self {
        Self
    }

    /// All registered templates in table order.
    pub fn entries(&self) -> &'static [LinkTemplateEntry] {
        TEMPLATES
    }

    /// Finds the template for a collection.
    pub fn lookup(&self, collection: &str) -> Option<TemplateFn> {
        TEMPLATES
            .iter()
            .find(|entry| entry.collection == collection)
            .map(|entry| entry.template)
    }

    /// Builds the external link for a coordinate, if its collection is listed.
    pub fn apply(&self, coordinate: &Coordinate) -> Option<ExternalLink> {
        let collection = coordinate.collection.as_ref()?;
        let template = self.lookup(collection.as_str())?;
        template(coordinate)
    }

    /// Builds the external link for a full `at://repo/collection/rkey` URI.
    pub fn apply_uri(&self, uri: &str) -> Option<ExternalLink> {
        let coordinate = Coordinate::from_at_uri(uri).ok()?;
        self.apply(&coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Authority;
    use crate::identifiers::{Nsid, RecordKey};

    fn coordinate(authority: &str, collection: &str, rkey: &str) -> Coordinate {
        Coordinate::record(
            Authority::classify(authority),
            Nsid::new(collection),
            RecordKey::new(rkey),
        )
    }

    #[test]
    fn bluesky_post_link() {
        let link = LinkTemplateRegistry::new()
            .apply(&coordinate("alice", "app.bsky.feed.post", "3l2zpbbhuvw2h"))
            .unwrap();
        assert_eq!(link.label, "Bluesky");
        assert_eq!(link.link, "https://bsky.app/profile/alice/post/3l2zpbbhuvw2h");
    }

    #[test]
    fn unlisted_collection_has_no_link() {
        let registry = LinkTemplateRegistry::new();
        assert!(registry
            .apply(&coordinate("alice", "app.bsky.feed.like", "abc"))
            .is_none());
        assert!(registry.lookup("app.bsky.feed").is_none());
    }

    #[test]
    fn repo_only_coordinate_has_no_link() {
        let repo = Coordinate::repo(Authority::classify("alice"));
        assert!(LinkTemplateRegistry::new().apply(&repo).is_none());
    }

    #[test]
    fn rkey_templates_need_an_rkey() {
        let mut c = coordinate("alice", "com.whtwnd.blog.entry", "abc");
        c.rkey = None;
        assert!(LinkTemplateRegistry::new().apply(&c).is_none());

        c.collection = Some(Nsid::new("blue.linkat.board"));
        assert_eq!(
            LinkTemplateRegistry::new().apply(&c).unwrap().link,
            "https://linkat.blue/alice"
        );
    }

    #[test]
    fn apply_uri_requires_full_record_uri() {
        let registry = LinkTemplateRegistry::new();
        assert_eq!(
            registry
                .apply_uri("at://did:plc:abc/app.bsky.graph.list/3k")
                .unwrap()
                .link,
            "https://bsky.app/profile/did:plc:abc/lists/3k"
        );
        assert!(registry.apply_uri("at://did:plc:abc/app.bsky.graph.list").is_none());
    }

    #[test]
    fn table_has_eight_unique_entries() {
        let entries = LinkTemplateRegistry::new().entries();
        assert_eq!(entries.len(), 8);
        let mut names: Vec<_> = entries.iter().map(|e| e.collection).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);
    }
}
