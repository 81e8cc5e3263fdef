//! Built-in seed data and seed validation.

use crate::{
  Error, Result,
  activity::{Activity, Listing},
};

/// The activities a fresh directory starts with.
pub fn default_listing() -> Listing {
  let mut listing = Listing::with_capacity(6);
  listing.push(
    "Chess Club",
    Activity::new(
      "Learn strategies and compete in chess tournaments",
      "Fridays, 3:30 PM - 5:00 PM",
      12,
    )
    .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
  );
  listing.push(
    "Programming Class",
    Activity::new(
      "Learn programming fundamentals and build software projects",
      "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
      20,
    )
    .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
  );
  listing.push(
    "Gym Class",
    Activity::new(
      "Physical education and sports activities",
      "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
      30,
    )
    .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
  );
  listing.push(
    "Soccer Team",
    Activity::new(
      "Join the school soccer team and compete in inter-school matches",
      "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
      25,
    )
    .with_participants(["alex@mergington.edu", "sarah@mergington.edu"]),
  );
  listing.push(
    "Basketball Club",
    Activity::new(
      "Practice basketball skills and play in tournaments",
      "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
      20,
    )
    .with_participants(["david@mergington.edu", "emily@mergington.edu"]),
  );
  listing.push(
    "Drama Club",
    Activity::new(
      "Participate in theater productions and improve acting skills",
      "Wednesdays, 3:30 PM - 5:30 PM",
      25,
    )
    .with_participants(["james@mergington.edu", "lisa@mergington.edu"]),
  );
  listing
}

/// Check the invariants a directory relies on: positive capacity and no
/// repeated email within one roster. Names are already unique by construction
/// of [`Listing`].
pub fn validate(listing: &Listing) -> Result<()> {
  for (name, activity) in listing.iter() {
    if activity.max_participants == 0 {
      return Err(Error::InvalidSeed(format!(
        "{name:?} has max_participants of 0"
      )));
    }
    for (i, email) in activity.participants.iter().enumerate() {
      if activity.participants[..i].contains(email) {
        return Err(Error::InvalidSeed(format!(
          "{email} is listed twice in {name:?}"
        )));
      }
    }
  }
  Ok(())
}
