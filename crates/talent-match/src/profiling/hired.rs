/// Decides which application statuses count as a hire.
///
/// Statuses compare after trimming and case folding, so
/// `" contratado pela decision"` matches `"Contratado pela Decision"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiredStatusPolicy {
    statuses: Vec<String>,
}

impl HiredStatusPolicy {
    pub fn new<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded: Vec<String> = statuses
            .into_iter()
            .map(|status| fold(status.as_ref()))
            .filter(|status| !status.is_empty())
            .collect();
        folded.dedup();
        Self { statuses: folded }
    }

    pub fn is_hired(&self, status: &str) -> bool {
        let status = fold(status);
        self.statuses.iter().any(|hired| *hired == status)
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }
}

fn fold(status: &str) -> String {
    status.trim().to_lowercase()
}
