//! [`MemoryDirectory`] — the in-memory implementation of [`ActivityDirectory`].

use tokio::sync::Mutex;

use roster_core::{
  Error, Result,
  activity::{Activity, Listing},
  directory::ActivityDirectory,
  seed,
};

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Slot {
  name:     String,
  activity: Mutex<Activity>,
}

/// The process-wide activity directory.
///
/// The slot table is fixed at construction; each activity's record sits
/// behind its own lock so the check-and-mutate pair of a signup or unregister
/// cannot interleave with another request for the same activity. Share it
/// between handlers with an `Arc`.
#[derive(Debug)]
pub struct MemoryDirectory {
  slots: Vec<Slot>,
}

impl MemoryDirectory {
  /// Build a directory from `listing` after checking its invariants.
  pub fn new(listing: Listing) -> Result<Self> {
    seed::validate(&listing)?;
    Ok(Self::from_listing(listing))
  }

  /// A directory holding the built-in seed activities.
  pub fn seeded() -> Self { Self::from_listing(seed::default_listing()) }

  fn from_listing(listing: Listing) -> Self {
    let slots = listing
      .into_iter()
      .map(|(name, activity)| Slot { name, activity: Mutex::new(activity) })
      .collect();
    Self { slots }
  }

  fn slot(&self, activity_name: &str) -> Result<&Slot> {
    self
      .slots
      .iter()
      .find(|s| s.name == activity_name)
      .ok_or_else(|| Error::ActivityNotFound(activity_name.to_owned()))
  }

  pub fn len(&self) -> usize { self.slots.len() }

  pub fn is_empty(&self) -> bool { self.slots.is_empty() }
}

impl Default for MemoryDirectory {
  fn default() -> Self { Self::seeded() }
}

// ─── ActivityDirectory impl ──────────────────────────────────────────────────

impl ActivityDirectory for MemoryDirectory {
  type Error = Error;

  async fn list_activities(&self) -> Result<Listing> {
    let mut listing = Listing::with_capacity(self.slots.len());
    for slot in &self.slots {
      let activity = slot.activity.lock().await.clone();
      listing.push(slot.name.clone(), activity);
    }
    Ok(listing)
  }

  async fn signup<'a>(&'a self, activity_name: &'a str, email: &'a str) -> Result<()> {
    let slot = self.slot(activity_name)?;
    let mut activity = slot.activity.lock().await;
    if !activity.add_participant(email) {
      tracing::debug!(activity = activity_name, email, "duplicate signup rejected");
      return Err(Error::AlreadySignedUp {
        activity: activity_name.to_owned(),
        email:    email.to_owned(),
      });
    }
    tracing::info!(
      activity = activity_name,
      email,
      enrolled = activity.enrolled(),
      "participant signed up"
    );
    Ok(())
  }

  async fn unregister<'a>(&'a self, activity_name: &'a str, email: &'a str) -> Result<()> {
    let slot = self.slot(activity_name)?;
    let mut activity = slot.activity.lock().await;
    if !activity.remove_participant(email) {
      tracing::debug!(activity = activity_name, email, "unregister of absent participant rejected");
      return Err(Error::NotSignedUp {
        activity: activity_name.to_owned(),
        email:    email.to_owned(),
      });
    }
    tracing::info!(
      activity = activity_name,
      email,
      enrolled = activity.enrolled(),
      "participant unregistered"
    );
    Ok(())
  }
}
