pub mod cost_confirmation;
