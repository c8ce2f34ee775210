mod complaint;

pub use complaint::{Complaint, ComplaintUpdate, NewComplaint};
