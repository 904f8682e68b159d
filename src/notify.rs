/// How long the multiple-choice feedback stays up before auto-dismissing.
pub const CHOICE_FEEDBACK_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStatus {
    Success,
    Error,
}

/// Click-mode results block input until the host reports dismissal;
/// multiple-choice feedback is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDuration {
    UntilDismissed,
    AutoDismissMs(u64),
}

/// A notification for the host surface to render. The session emits
/// exactly one per resolved round.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub status: NoticeStatus,
    pub duration: NoticeDuration,
}

impl Notification {
    pub(crate) fn click_correct(street: &str) -> Self {
        Self {
            title: "Correct!".into(),
            description: format!("You found {street}!"),
            status: NoticeStatus::Success,
            duration: NoticeDuration::UntilDismissed,
        }
    }

    pub(crate) fn click_incorrect(clicked: &str, reveal: bool) -> Self {
        let hint = if reveal {
            " The correct street is highlighted."
        } else {
            ""
        };
        Self {
            title: "Incorrect".into(),
            description: format!("That's {clicked}.{hint}"),
            status: NoticeStatus::Error,
            duration: NoticeDuration::UntilDismissed,
        }
    }

    pub(crate) fn choice_correct(street: &str) -> Self {
        Self {
            title: "Correct!".into(),
            description: format!("You found {street}!"),
            status: NoticeStatus::Success,
            duration: NoticeDuration::AutoDismissMs(CHOICE_FEEDBACK_MS),
        }
    }

    pub(crate) fn choice_incorrect(street: &str) -> Self {
        Self {
            title: "Incorrect".into(),
            description: format!("The correct street is {street}."),
            status: NoticeStatus::Error,
            duration: NoticeDuration::AutoDismissMs(CHOICE_FEEDBACK_MS),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.duration == NoticeDuration::UntilDismissed
    }
}
