pub mod poll_list;
