pub mod error_state;
pub mod filter_panel;
pub mod input_form;
pub mod loading_skeleton;
pub mod offer_card;
pub mod offers_list;
pub mod toast;
