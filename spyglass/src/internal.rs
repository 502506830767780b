mod guard;

pub(crate) use guard::guarded;
