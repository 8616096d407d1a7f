use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of the identifiers handed out by `on.soundcloud.com`.
pub const DEFAULT_ID_LENGTH: usize = 5;

/// Draw `len` characters uniformly from `[A-Za-z0-9]`.
pub fn random_id<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

pub fn candidate_url(base_url: &str, id: &str) -> String {
    format!("{base_url}{id}")
}

/// Strip the query string off a redirect `Location`. Returns `None` when
/// nothing is left.
pub fn redirect_target(location: &str) -> Option<&str> {
    let target = location.split('?').next().unwrap_or_default();
    (!target.is_empty()).then_some(target)
}
