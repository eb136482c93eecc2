//! Files of a submission and the URLs they end up at.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;
use serde::ser::SerializeMap;

/// One uploaded file, held only for the duration of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    /// Raw content.
    pub data: Bytes,
    /// Declared MIME type.
    pub content_type: String,
    /// Original filename as sent by the browser.
    pub filename: String,
}

impl FileItem {
    /// Content type used when the client did not declare one.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "application/octet-stream";

    /// Create a file item.
    #[must_use]
    pub fn new(
        data: impl Into<Bytes>,
        content_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
            filename: filename.into(),
        }
    }
}

/// Files submitted under one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Form field name.
    pub name: String,
    /// Files in submission order.
    pub items: Vec<FileItem>,
}

/// All file groups of a submission, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileGroups {
    groups: Vec<FileGroup>,
}

impl FileGroups {
    /// No files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file to the group called `name`, creating the group if needed.
    pub fn push(&mut self, name: impl Into<String>, item: FileItem) {
        let name = name.into();
        match self.groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.items.push(item),
            None => self.groups.push(FileGroup {
                name,
                items: vec![item],
            }),
        }
    }

    /// Keep only groups named in `allowed`; returns the names dropped.
    pub fn retain_allowed(&mut self, allowed: &[&str]) -> Vec<String> {
        let mut dropped = Vec::new();
        self.groups.retain(|group| {
            let keep = allowed.contains(&group.name.as_str());
            if !keep {
                dropped.push(group.name.clone());
            }
            keep
        });
        dropped
    }

    /// Iterate over the groups.
    pub fn iter(&self) -> impl Iterator<Item = &FileGroup> {
        self.groups.iter()
    }

    /// Look up a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FileGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Total number of files across groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    /// Whether there are no files at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_count() == 0
    }
}

/// Public URLs per file group.
///
/// Serializes as `{"<group>_urls": [...]}`; groups that produced no URL are
/// never present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupUrls {
    urls: BTreeMap<String, Vec<String>>,
}

impl GroupUrls {
    /// Column name holding a group's URLs.
    #[must_use]
    pub fn column_name(group: &str) -> String {
        format!("{group}_urls")
    }

    /// Record the URLs of a group. An empty list is not recorded.
    pub fn insert(&mut self, group: impl Into<String>, urls: Vec<String>) {
        if !urls.is_empty() {
            self.urls.insert(group.into(), urls);
        }
    }

    /// URLs of a group.
    #[must_use]
    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.urls.get(group).map(Vec::as_slice)
    }

    /// Owned copy of a group's URLs, for column mapping.
    #[must_use]
    pub fn column(&self, group: &str) -> Option<Vec<String>> {
        self.urls.get(group).cloned()
    }

    /// Group names with URLs.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.urls.keys().map(String::as_str)
    }

    /// Number of groups with URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether no group has URLs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl Serialize for GroupUrls {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.urls.len()))?;
        for (group, urls) in &self.urls {
            map.serialize_entry(&Self::column_name(group), urls)?;
        }
        map.end()
    }
}

/// Where a submission's files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Storage bucket.
    pub bucket: String,
    /// Key prefix.
    pub prefix: String,
    /// Submission time in milliseconds since the epoch.
    pub timestamp_ms: i64,
}

/// Outcome of a fully successful batch upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFiles {
    /// Public URLs per group.
    pub urls: GroupUrls,
    /// Every key written, for compensation.
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> FileItem {
        FileItem::new(Bytes::from_static(b"x"), "application/pdf", name)
    }

    #[test]
    fn test_push_groups_by_name_in_first_seen_order() {
        let mut groups = FileGroups::new();
        groups.push("estatuto_social", item("a.pdf"));
        groups.push("logo", item("logo.png"));
        groups.push("estatuto_social", item("b.pdf"));

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["estatuto_social", "logo"]);
        let estatuto = groups.get("estatuto_social").expect("group exists");
        assert_eq!(estatuto.items[0].filename, "a.pdf");
        assert_eq!(estatuto.items[1].filename, "b.pdf");
        assert_eq!(groups.file_count(), 3);
    }

    #[test]
    fn test_retain_allowed_reports_dropped() {
        let mut groups = FileGroups::new();
        groups.push("logo", item("logo.png"));
        groups.push("malware", item("x.exe"));

        let dropped = groups.retain_allowed(&["logo"]);
        assert_eq!(dropped, vec!["malware".to_string()]);
        assert_eq!(groups.file_count(), 1);
    }

    #[test]
    fn test_group_urls_skip_empty_and_serialize_with_suffix() {
        let mut urls = GroupUrls::default();
        urls.insert("logo", vec!["https://cdn/logo.png".to_string()]);
        urls.insert("organigrama", Vec::new());

        assert_eq!(urls.len(), 1);
        let value = serde_json::to_value(&urls).expect("serializable");
        assert_eq!(value, serde_json::json!({"logo_urls": ["https://cdn/logo.png"]}));
    }
}
