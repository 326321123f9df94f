use crate::capability::PhotoRef;

/// What the landing screen knows about the user
#[derive(Debug, Clone, Default)]
pub struct Profile {
    user_name: String,
    picture: Option<PhotoRef>,
    tap_count: u32,
}

impl Profile {
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn set_user_name(&mut self, name: &str) {
        self.user_name = name.trim().to_owned();
    }

    pub fn greeting(&self) -> String {
        if self.user_name.is_empty() {
            "Hello there!".to_owned()
        } else {
            format!("Hello, {}!", self.user_name)
        }
    }

    pub fn picture(&self) -> Option<&PhotoRef> {
        self.picture.as_ref()
    }

    pub fn set_picture(&mut self, picture: PhotoRef) {
        self.picture = Some(picture);
    }

    pub fn tap(&mut self) -> u32 {
        self.tap_count = self.tap_count.saturating_add(1);
        self.tap_count
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn tap_message(&self) -> Option<String> {
        match self.tap_count {
            0 => None,
            1 => Some("You've tapped 1 time!".to_owned()),
            n => Some(format!("You've tapped {n} times!")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_uses_trimmed_name() {
        let mut profile = Profile::default();
        assert_eq!(profile.greeting(), "Hello there!");

        profile.set_user_name("  Alphie ");
        assert_eq!(profile.user_name(), "Alphie");
        assert_eq!(profile.greeting(), "Hello, Alphie!");

        profile.set_user_name("   ");
        assert_eq!(profile.greeting(), "Hello there!");
    }

    #[test]
    fn test_tap_message_pluralises() {
        let mut profile = Profile::default();
        assert_eq!(profile.tap_message(), None);

        profile.tap();
        assert_eq!(profile.tap_message().as_deref(), Some("You've tapped 1 time!"));

        profile.tap();
        assert_eq!(profile.tap_message().as_deref(), Some("You've tapped 2 times!"));
    }
}
