//! Activity records and the ordered [`Listing`] snapshot.

use std::fmt;

use serde::{
  Deserialize, Deserializer, Serialize, Serializer,
  de::{self, MapAccess, Visitor},
};

// ─── Activity ────────────────────────────────────────────────────────────────

/// A school activity. Its name is the directory key and is not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
  pub description:      String,
  /// Free text, e.g. `"Fridays, 3:30 PM - 5:00 PM"`.
  pub schedule:         String,
  /// Advertised capacity. Informational only: signups never check it.
  pub max_participants: u32,
  /// Participant emails in signup order.
  #[serde(default)]
  pub participants:     Vec<String>,
}

impl Activity {
  pub fn new(
    description: impl Into<String>,
    schedule: impl Into<String>,
    max_participants: u32,
  ) -> Self {
    Self {
      description: description.into(),
      schedule: schedule.into(),
      max_participants,
      participants: Vec::new(),
    }
  }

  /// Builder-style helper used when seeding.
  pub fn with_participants<I, E>(mut self, emails: I) -> Self
  where
    I: IntoIterator<Item = E>,
    E: Into<String>,
  {
    self.participants.extend(emails.into_iter().map(Into::into));
    self
  }

  pub fn has_participant(&self, email: &str) -> bool {
    self.participants.iter().any(|p| p == email)
  }

  /// Append `email` to the roster. Returns `false` (and leaves the roster
  /// untouched) if it is already present.
  pub fn add_participant(&mut self, email: &str) -> bool {
    if self.has_participant(email) {
      return false;
    }
    self.participants.push(email.to_owned());
    true
  }

  /// Remove `email` from the roster, keeping the order of the remaining
  /// entries. Returns `false` if it was not present.
  pub fn remove_participant(&mut self, email: &str) -> bool {
    match self.participants.iter().position(|p| p == email) {
      Some(idx) => {
        self.participants.remove(idx);
        true
      }
      None => false,
    }
  }

  pub fn enrolled(&self) -> usize { self.participants.len() }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// An ordered snapshot of the directory: activity name → [`Activity`].
///
/// Serialises as a JSON object whose keys keep directory order. Deserialising
/// rejects duplicate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
  entries: Vec<(String, Activity)>,
}

impl Listing {
  pub fn new() -> Self { Self::default() }

  pub fn with_capacity(capacity: usize) -> Self {
    Self { entries: Vec::with_capacity(capacity) }
  }

  /// Append an activity. Returns `false` without inserting if `name` is
  /// already present.
  pub fn push(&mut self, name: impl Into<String>, activity: Activity) -> bool {
    let name = name.into();
    if self.get(&name).is_some() {
      return false;
    }
    self.entries.push((name, activity));
    true
  }

  pub fn get(&self, name: &str) -> Option<&Activity> {
    self
      .entries
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, a)| a)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(n, _)| n.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
    self.entries.iter().map(|(n, a)| (n.as_str(), a))
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl IntoIterator for Listing {
  type Item = (String, Activity);
  type IntoIter = std::vec::IntoIter<(String, Activity)>;

  fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}

impl Serialize for Listing {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.entries.iter().map(|(n, a)| (n, a)))
  }
}

impl<'de> Deserialize<'de> for Listing {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct ListingVisitor;

    impl<'de> Visitor<'de> for ListingVisitor {
      type Value = Listing;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of activity name to activity")
      }

      fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Listing, M::Error> {
        let mut listing = Listing::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, activity)) = map.next_entry::<String, Activity>()? {
          if listing.get(&name).is_some() {
            return Err(de::Error::custom(format!("duplicate activity {name:?}")));
          }
          listing.push(name, activity);
        }
        Ok(listing)
      }
    }

    deserializer.deserialize_map(ListingVisitor)
  }
}
