pub mod fake_rtorrent;
